//! Month-bucketed time series.
//!
//! Every series has exactly one point per month of its [`MonthRange`]; months
//! without contributing records carry zero so charts plot a value there.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::a001_shipment::{known_terminals, normalize_terminal, DateField, ShipmentRecord};
use crate::shared::date_utils::{days_between, year_month0, MONTH_LABELS, MONTH_SHORT_LABELS};

/// First month (zero-based) of the fiscal half-year slice: July
pub const FISCAL_SLICE_OFFSET: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthRange {
    /// January..December, 12 points
    #[default]
    FullYear,
    /// July..December, 6 points
    FiscalSlice,
}

impl MonthRange {
    pub fn months(&self) -> std::ops::Range<u32> {
        match self {
            MonthRange::FullYear => 0..12,
            MonthRange::FiscalSlice => FISCAL_SLICE_OFFSET..12,
        }
    }

    pub fn len(&self) -> usize {
        self.months().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point index of a zero-based month, `None` outside the range
    pub fn index_of(&self, month0: u32) -> Option<usize> {
        let months = self.months();
        months
            .contains(&month0)
            .then(|| (month0 - months.start) as usize)
    }

    fn empty_points(&self) -> Vec<SeriesPoint> {
        self.months()
            .map(|m| SeriesPoint {
                month0: m,
                label: MONTH_LABELS[m as usize].to_string(),
                value: 0.0,
                count: 0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month0: u32,
    pub label: String,
    pub value: f64,
    /// Records behind the value
    pub count: usize,
}

impl SeriesPoint {
    /// Three-letter month name for axis ticks
    pub fn short_label(&self) -> &'static str {
        MONTH_SHORT_LABELS
            .get(self.month0 as usize)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSeries {
    pub terminal: String,
    pub points: Vec<SeriesPoint>,
}

impl TerminalSeries {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

fn month_slot(record: &ShipmentRecord, month_field: DateField, range: MonthRange) -> Option<usize> {
    let (_, m) = year_month0(record.date(month_field))?;
    range.index_of(m)
}

/// Mean days between `from` and `to`, bucketed by the month of
/// `month_field`, rounded to the nearest whole day.
///
/// Pairs with a missing endpoint are left out of the mean.
pub fn monthly_mean_duration<'a, I>(
    records: I,
    month_field: DateField,
    from: DateField,
    to: DateField,
    range: MonthRange,
) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a ShipmentRecord>,
{
    let mut sums = vec![0i64; range.len()];
    let mut points = range.empty_points();

    for record in records {
        let Some(slot) = month_slot(record, month_field, range) else {
            continue;
        };
        let Some(days) = days_between(record.date(from), record.date(to)) else {
            continue;
        };
        sums[slot] += days;
        points[slot].count += 1;
    }

    for (point, sum) in points.iter_mut().zip(sums) {
        if point.count > 0 {
            point.value = (sum as f64 / point.count as f64).round();
        }
    }
    points
}

/// Distinct DI numbers per month of `month_field`
pub fn monthly_unique_di<'a, I>(records: I, month_field: DateField, range: MonthRange) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a ShipmentRecord>,
{
    let mut seen: Vec<HashSet<String>> = vec![HashSet::new(); range.len()];
    let mut points = range.empty_points();

    for record in records {
        let Some(di) = record.di_key() else {
            continue;
        };
        let Some(slot) = month_slot(record, month_field, range) else {
            continue;
        };
        seen[slot].insert(di.to_string());
        points[slot].count += 1;
    }

    for (point, dis) in points.iter_mut().zip(seen) {
        point.value = dis.len() as f64;
    }
    points
}

/// Containers per normalized terminal per month. Known terminals come
/// first, unknown ones follow in first-seen order.
pub fn monthly_containers_by_terminal<'a, I>(
    records: I,
    month_field: DateField,
    range: MonthRange,
) -> Vec<TerminalSeries>
where
    I: IntoIterator<Item = &'a ShipmentRecord>,
{
    let mut series: Vec<TerminalSeries> = known_terminals()
        .into_iter()
        .map(|t| TerminalSeries {
            terminal: t.to_string(),
            points: range.empty_points(),
        })
        .collect();

    for record in records {
        let Some(terminal) = record
            .terminal
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(normalize_terminal)
        else {
            continue;
        };
        let Some(slot) = month_slot(record, month_field, range) else {
            continue;
        };

        let idx = match series.iter().position(|s| s.terminal == terminal) {
            Some(idx) => idx,
            None => {
                series.push(TerminalSeries {
                    terminal,
                    points: range.empty_points(),
                });
                series.len() - 1
            }
        };
        let point = &mut series[idx].points[slot];
        point.value += record.container_count() as f64;
        point.count += 1;
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_from_month_index() {
        let points = MonthRange::FiscalSlice.empty_points();
        assert_eq!(points[0].short_label(), "Jul");
        assert_eq!(points[5].short_label(), "Dez");
    }

    fn rec(id: &str) -> ShipmentRecord {
        ShipmentRecord {
            id: id.into(),
            bl_awb: id.into(),
            ..Default::default()
        }
    }

    fn cleared(id: &str, reg: &str, clearance: Option<&str>) -> ShipmentRecord {
        ShipmentRecord {
            di_registration_date: Some(reg.into()),
            clearance_date: clearance.map(String::from),
            ..rec(id)
        }
    }

    #[test]
    fn test_series_lengths_are_fixed() {
        let empty: Vec<ShipmentRecord> = Vec::new();
        let full = monthly_mean_duration(
            &empty,
            DateField::DiRegistration,
            DateField::DiRegistration,
            DateField::Clearance,
            MonthRange::FullYear,
        );
        assert_eq!(full.len(), 12);
        assert!(full.iter().all(|p| p.value == 0.0));

        let fiscal = monthly_unique_di(&empty, DateField::DiRegistration, MonthRange::FiscalSlice);
        assert_eq!(fiscal.len(), 6);
        assert_eq!(fiscal[0].label, "Julho");
        assert_eq!(fiscal[5].label, "Dezembro");
    }

    #[test]
    fn test_mean_duration_rounds_and_skips_missing_pairs() {
        let records = vec![
            cleared("1", "2024-03-01", Some("2024-03-03")),
            cleared("2", "2024-03-10", Some("2024-03-13")),
            cleared("3", "2024-03-15", None),
            cleared("4", "2024-05-01", Some("2024-05-02")),
        ];
        let points = monthly_mean_duration(
            &records,
            DateField::DiRegistration,
            DateField::DiRegistration,
            DateField::Clearance,
            MonthRange::FullYear,
        );
        // (2 + 3) / 2 = 2.5 rounds to 3
        assert_eq!(points[2].value, 3.0);
        assert_eq!(points[2].count, 2);
        assert_eq!(points[3].value, 0.0);
        assert_eq!(points[4].value, 1.0);
    }

    #[test]
    fn test_unique_di_per_month() {
        let mut a = cleared("1", "2024-08-01", None);
        a.di_number = Some("DI-1".into());
        let mut b = cleared("2", "2024-08-20", None);
        b.di_number = Some("DI-1".into());
        let mut c = cleared("3", "2024-02-20", None);
        c.di_number = Some("DI-2".into());
        let records = vec![a, b, c];

        let fiscal = monthly_unique_di(&records, DateField::DiRegistration, MonthRange::FiscalSlice);
        assert_eq!(fiscal.len(), 6);
        assert_eq!(fiscal[1].value, 1.0);
        assert_eq!(fiscal[1].count, 2);
        assert_eq!(fiscal.iter().map(|p| p.value).sum::<f64>(), 1.0);

        let full = monthly_unique_di(&records, DateField::DiRegistration, MonthRange::FullYear);
        assert_eq!(full[1].value, 1.0);
        assert_eq!(full[7].value, 1.0);
    }

    #[test]
    fn test_containers_by_terminal() {
        let records = vec![
            ShipmentRecord {
                terminal: Some("Portonave S/A".into()),
                mode: Some("FCL".into()),
                fcl: Some(2),
                eta: Some("2024-01-10".into()),
                ..rec("1")
            },
            ShipmentRecord {
                terminal: Some("portonave".into()),
                mode: Some("LCL".into()),
                fcl: Some(5),
                eta: Some("2024-01-12".into()),
                ..rec("2")
            },
            ShipmentRecord {
                terminal: Some("Recinto X".into()),
                mode: Some("FCL".into()),
                fcl: Some(1),
                eta: Some("2024-04-01".into()),
                ..rec("3")
            },
        ];
        let series = monthly_containers_by_terminal(&records, DateField::Eta, MonthRange::FullYear);
        let portonave = series.iter().find(|s| s.terminal == "PORTONAVE").unwrap();
        assert_eq!(portonave.points.len(), 12);
        assert_eq!(portonave.points[0].value, 2.0);
        assert_eq!(portonave.points[0].count, 2);
        let last = series.last().unwrap();
        assert_eq!(last.terminal, "Recinto X");
        assert_eq!(last.total(), 1.0);
    }

    #[test]
    fn test_index_of_range() {
        assert_eq!(MonthRange::FiscalSlice.index_of(5), None);
        assert_eq!(MonthRange::FiscalSlice.index_of(6), Some(0));
        assert_eq!(MonthRange::FullYear.index_of(11), Some(11));
    }
}
