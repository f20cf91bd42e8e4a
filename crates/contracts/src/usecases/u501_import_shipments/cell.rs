use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::shared::date_utils::parse_date;

/// Days between the spreadsheet serial epoch and 1970-01-01
pub const EXCEL_EPOCH_OFFSET_DAYS: f64 = 25569.0;

/// One cell of the sheet as handed over by the spreadsheet reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Trimmed text form. Whole numbers print without a fraction so numeric
    /// references ("20231234") survive the trip through the reader.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_text().is_empty()
    }
}

/// Calendar date of a spreadsheet serial number (time of day is dropped).
///
/// 25569 -> 1970-01-01, 45000 -> 2023-03-15, 1 -> 1899-12-31
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = (serial - EXCEL_EPOCH_OFFSET_DAYS).floor();
    if days.abs() > 3_000_000.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    epoch.checked_add_signed(Duration::days(days as i64))
}

/// `d/m/y`, `d.m.y` or `d-m-y` with a one or two digit day and month.
/// Two-digit years above 50 land in the 1900s, the rest in the 2000s.
fn parse_day_month_year(s: &str) -> Option<Option<NaiveDate>> {
    let parts: Vec<&str> = s.split(['/', '.', '-']).collect();
    if parts.len() != 3 {
        return None;
    }
    let (d, m, y) = (parts[0], parts[1], parts[2]);
    let all_digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if !(all_digits(d) && all_digits(m) && all_digits(y)) {
        return None;
    }
    if d.len() > 2 || m.len() > 2 || !(y.len() == 2 || y.len() == 4) {
        return None;
    }

    // Shape matched: from here on a bad value is "unparseable", not "other shape"
    let day: u32 = d.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    let mut year: i32 = y.parse().ok()?;
    if y.len() == 2 {
        year += if year > 50 { 1900 } else { 2000 };
    }
    Some(NaiveDate::from_ymd_opt(year, month, day))
}

/// Normalize a date cell to `YYYY-MM-DD`.
///
/// Empty or unparseable input gives an empty string.
pub fn normalize_date_cell(cell: &Cell) -> String {
    let date = match cell {
        Cell::Number(n) => serial_to_date(*n),
        Cell::Text(raw) => {
            let s = raw.trim();
            if s.is_empty() {
                None
            } else {
                match parse_day_month_year(s) {
                    Some(shaped) => shaped,
                    None => parse_date(s).map(|dt| dt.date()),
                }
            }
        }
        Cell::Empty | Cell::Bool(_) => None,
    };
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Number from a cell; accepts `1.234,56`, `1,234.56`, `1234,5` and
/// currency prefixes.
pub fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(raw) => {
            let cleaned: String = raw
                .trim()
                .trim_start_matches("R$")
                .trim_start_matches("US$")
                .trim_start_matches(['$', '€'])
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
                (Some(c), Some(p)) if c > p => cleaned.replace('.', "").replace(',', "."),
                (Some(_), Some(_)) => cleaned.replace(',', ""),
                (Some(_), None) => cleaned.replace(',', "."),
                _ => cleaned,
            };
            normalized.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Non-negative whole count (container quantities)
pub fn parse_count(cell: &Cell) -> Option<u32> {
    parse_number(cell)
        .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_reference_pairs() {
        assert_eq!(serial_to_date(25569.0), NaiveDate::from_ymd_opt(1970, 1, 1));
        assert_eq!(serial_to_date(45000.0), NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(serial_to_date(1.0), NaiveDate::from_ymd_opt(1899, 12, 31));
        // time of day does not move the calendar date
        assert_eq!(serial_to_date(45000.75), NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_serial_round_trip_is_stable() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        for serial in [1.0, 25569.0, 36526.0, 45000.0, 47000.0] {
            let date = serial_to_date(serial).unwrap();
            let back = (date - epoch).num_days() as f64 + EXCEL_EPOCH_OFFSET_DAYS;
            assert_eq!(back, serial);
        }
    }

    #[test]
    fn test_normalize_numeric_cell() {
        assert_eq!(normalize_date_cell(&Cell::Number(45000.0)), "2023-03-15");
    }

    #[test]
    fn test_normalize_day_month_year_strings() {
        assert_eq!(normalize_date_cell(&Cell::text("15/03/2023")), "2023-03-15");
        assert_eq!(normalize_date_cell(&Cell::text("5.3.2023")), "2023-03-05");
        assert_eq!(normalize_date_cell(&Cell::text("05-03-23")), "2023-03-05");
        assert_eq!(normalize_date_cell(&Cell::text("05/03/99")), "1999-03-05");
        assert_eq!(normalize_date_cell(&Cell::text("05/03/50")), "2050-03-05");
    }

    #[test]
    fn test_normalize_generic_fallback() {
        assert_eq!(normalize_date_cell(&Cell::text("2023-03-15")), "2023-03-15");
        assert_eq!(
            normalize_date_cell(&Cell::text("2023-03-15T10:30:00Z")),
            "2023-03-15"
        );
    }

    #[test]
    fn test_unparseable_dates_become_empty() {
        assert_eq!(normalize_date_cell(&Cell::Empty), "");
        assert_eq!(normalize_date_cell(&Cell::text("   ")), "");
        assert_eq!(normalize_date_cell(&Cell::text("a definir")), "");
        assert_eq!(normalize_date_cell(&Cell::text("31/02/2024")), "");
        assert_eq!(normalize_date_cell(&Cell::Bool(true)), "");
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number(&Cell::text("1.234,56")), Some(1234.56));
        assert_eq!(parse_number(&Cell::text("1,234.56")), Some(1234.56));
        assert_eq!(parse_number(&Cell::text("5309,00")), Some(5309.0));
        assert_eq!(parse_number(&Cell::text("US$ 10")), Some(10.0));
        assert_eq!(parse_number(&Cell::Number(2.0)), Some(2.0));
        assert_eq!(parse_number(&Cell::text("n/a")), None);
        assert_eq!(parse_count(&Cell::text("-1")), None);
        assert_eq!(parse_count(&Cell::text("3")), Some(3));
    }

    #[test]
    fn test_numeric_text_form() {
        assert_eq!(Cell::Number(20231234.0).as_text(), "20231234");
        assert_eq!(Cell::Number(1.5).as_text(), "1.5");
        assert_eq!(Cell::text("  abc ").as_text(), "abc");
    }
}
