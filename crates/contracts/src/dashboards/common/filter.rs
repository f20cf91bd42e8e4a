//! Dashboard filter: cargo types, year and month applied to one reference
//! date of the shipment.

use std::collections::BTreeSet;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::a001_shipment::{DateField, ShipmentRecord};
use crate::shared::date_utils::parse_opt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

/// Month component, zero-based (0 = January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipmentFilter {
    /// Empty set means no constraint
    pub cargo_types: BTreeSet<String>,
    pub year: YearFilter,
    pub month: MonthFilter,
}

impl ShipmentFilter {
    /// A record matches when its cargo type is selected (or nothing is
    /// selected), its reference date parses and year/month agree.
    ///
    /// Undated records never match: they cannot be placed in a time bucket.
    pub fn matches(&self, record: &ShipmentRecord, field: DateField) -> bool {
        if !self.matches_cargo_type(record) {
            return false;
        }

        let Some(date) = parse_opt(record.date(field)) else {
            return false;
        };
        if let YearFilter::Year(y) = self.year {
            if date.year() != y {
                return false;
            }
        }
        if let MonthFilter::Month(m) = self.month {
            if date.month0() != m {
                return false;
            }
        }
        true
    }

    /// Records passing the filter, in input order
    pub fn apply<'a>(&self, records: &'a [ShipmentRecord], field: DateField) -> Vec<&'a ShipmentRecord> {
        records.iter().filter(|r| self.matches(r, field)).collect()
    }

    /// Like [`apply`](Self::apply), but with year and month both `All` the
    /// date is not required and only the cargo type is checked.
    pub fn apply_keeping_undated<'a>(
        &self,
        records: &'a [ShipmentRecord],
        field: DateField,
    ) -> Vec<&'a ShipmentRecord> {
        if !self.is_time_unbounded() {
            return self.apply(records, field);
        }
        records.iter().filter(|r| self.matches_cargo_type(r)).collect()
    }

    pub fn is_time_unbounded(&self) -> bool {
        self.year == YearFilter::All && self.month == MonthFilter::All
    }

    fn matches_cargo_type(&self, record: &ShipmentRecord) -> bool {
        if self.cargo_types.is_empty() {
            return true;
        }
        record
            .cargo_type
            .as_deref()
            .map(|c| self.cargo_types.contains(c.trim()))
            .unwrap_or(false)
    }

    pub fn toggle_cargo_type(&mut self, cargo_type: &str) {
        let key = cargo_type.trim().to_string();
        if !self.cargo_types.remove(&key) {
            self.cargo_types.insert(key);
        }
    }

    /// Years present in the reference date, ascending
    pub fn available_years(records: &[ShipmentRecord], field: DateField) -> Vec<i32> {
        records
            .iter()
            .filter_map(|r| parse_opt(r.date(field)))
            .map(|d| d.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-blank cargo types, sorted
    pub fn available_cargo_types(records: &[ShipmentRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| r.cargo_type.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(cargo: &str, eta: Option<&str>) -> ShipmentRecord {
        ShipmentRecord {
            id: "x".into(),
            bl_awb: "x".into(),
            cargo_type: Some(cargo.into()),
            eta: eta.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_filter_still_requires_date() {
        let f = ShipmentFilter::default();
        assert!(f.matches(&rec("Peças", Some("2024-05-01")), DateField::Eta));
        assert!(!f.matches(&rec("Peças", None), DateField::Eta));
        assert!(!f.matches(&rec("Peças", Some("sem data")), DateField::Eta));
    }

    #[test]
    fn test_year_month_and_cargo_type() {
        let mut f = ShipmentFilter {
            year: YearFilter::Year(2024),
            month: MonthFilter::Month(4),
            ..Default::default()
        };
        assert!(f.matches(&rec("Peças", Some("2024-05-20")), DateField::Eta));
        assert!(!f.matches(&rec("Peças", Some("2024-06-20")), DateField::Eta));
        assert!(!f.matches(&rec("Peças", Some("2023-05-20")), DateField::Eta));

        f.toggle_cargo_type("Resina");
        assert!(!f.matches(&rec("Peças", Some("2024-05-20")), DateField::Eta));
        assert!(f.matches(&rec("Resina", Some("2024-05-20")), DateField::Eta));
        f.toggle_cargo_type("Resina");
        assert!(f.cargo_types.is_empty());
    }

    #[test]
    fn test_undated_kept_only_without_time_bounds() {
        let records = vec![rec("Peças", None), rec("Resina", Some("2024-05-01"))];
        let mut f = ShipmentFilter::default();
        assert_eq!(f.apply_keeping_undated(&records, DateField::Eta).len(), 2);

        f.toggle_cargo_type("Peças");
        let kept = f.apply_keeping_undated(&records, DateField::Eta);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].eta, None);

        f.toggle_cargo_type("Peças");
        f.year = YearFilter::Year(2024);
        let kept = f.apply_keeping_undated(&records, DateField::Eta);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].eta.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_reference_field_is_respected() {
        let mut r = rec("Peças", Some("2024-05-20"));
        r.di_registration_date = Some("2023-01-10".into());
        let f = ShipmentFilter {
            year: YearFilter::Year(2023),
            ..Default::default()
        };
        assert!(!f.matches(&r, DateField::Eta));
        assert!(f.matches(&r, DateField::DiRegistration));
    }

    #[test]
    fn test_available_options() {
        let records = vec![
            rec("Resina", Some("2024-01-01")),
            rec("Peças", Some("2023-01-01")),
            rec(" Resina ", None),
            rec("", Some("2024-02-01")),
        ];
        assert_eq!(ShipmentFilter::available_years(&records, DateField::Eta), vec![2023, 2024]);
        assert_eq!(
            ShipmentFilter::available_cargo_types(&records),
            vec!["Peças".to_string(), "Resina".to_string()]
        );
    }
}
