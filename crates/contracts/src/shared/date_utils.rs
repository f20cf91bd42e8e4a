//! Date helpers shared by the aggregation pipeline, the spreadsheet importer
//! and the UI.
//!
//! Stored shipment dates are plain strings. Everything that needs arithmetic
//! goes through [`parse_date`], which returns `None` instead of an invalid
//! sentinel so a bad cell can never leak into a metric.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Month names used by the chart axes (index 0 = January)
pub const MONTH_LABELS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub const MONTH_SHORT_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Parse a stored date string.
///
/// Accepted shapes: `YYYY-MM-DD`, ISO datetime with or without fraction,
/// RFC 3339 with offset (wall-clock time is kept) and `DD/MM/YYYY`.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// Same as [`parse_date`] for an optional field.
pub fn parse_opt(value: Option<&str>) -> Option<NaiveDateTime> {
    value.and_then(parse_date)
}

/// Whole days between two dates, rounded up.
///
/// Returns `None` when either endpoint is missing or unparseable so callers
/// exclude the pair instead of counting it as zero.
pub fn days_between(from: Option<&str>, to: Option<&str>) -> Option<i64> {
    let a = parse_opt(from)?;
    let b = parse_opt(to)?;
    let ms = (b - a).num_milliseconds().abs();
    Some((ms + MS_PER_DAY - 1) / MS_PER_DAY)
}

/// Zero-based month and year of a stored date
pub fn year_month0(value: Option<&str>) -> Option<(i32, u32)> {
    let dt = parse_opt(value)?;
    Some((dt.year(), dt.month0()))
}

/// Format a stored date as `DD/MM/YYYY` for tables; unparseable values are
/// shown as they are.
pub fn format_date_br(value: &str) -> String {
    match parse_date(value) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_between_reference_pair() {
        assert_eq!(days_between(Some("2024-01-01"), Some("2024-01-03")), Some(2));
        assert_eq!(days_between(Some("2024-01-03"), Some("2024-01-01")), Some(2));
    }

    #[test]
    fn test_days_between_missing_endpoint() {
        assert_eq!(days_between(None, Some("2024-01-03")), None);
        assert_eq!(days_between(Some("2024-01-03"), Some("")), None);
        assert_eq!(days_between(Some("not a date"), Some("2024-01-03")), None);
    }

    #[test]
    fn test_days_between_rounds_up_partial_days() {
        assert_eq!(
            days_between(Some("2024-01-01T00:00:00"), Some("2024-01-02T06:00:00")),
            Some(2)
        );
        assert_eq!(days_between(Some("2024-01-01"), Some("2024-01-01")), Some(0));
    }

    #[test]
    fn test_parse_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date("2024-03-15"), Some(expected));
        assert_eq!(parse_date("15/03/2024"), Some(expected));
        assert_eq!(parse_date("2024-03-15T00:00:00Z"), Some(expected));
        assert_eq!(parse_date("  "), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_year_month0() {
        assert_eq!(year_month0(Some("2024-01-31")), Some((2024, 0)));
        assert_eq!(year_month0(Some("2023-12-01")), Some((2023, 11)));
        assert_eq!(year_month0(None), None);
    }

    #[test]
    fn test_format_date_br() {
        assert_eq!(format_date_br("2024-03-15"), "15/03/2024");
        assert_eq!(format_date_br("invalid"), "invalid");
    }
}
