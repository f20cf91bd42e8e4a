//! Grouping of filtered shipments into fixed, ordered buckets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::a001_shipment::{
    known_terminals, normalize_terminal, Channel, Incoterm, ShipmentMode, ShipmentRecord,
    ShipmentStatus,
};

/// Attribute a view groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Status,
    Incoterm,
    Mode,
    Terminal,
    Channel,
}

impl Dimension {
    /// Buckets every view of this dimension starts with, in display order
    pub fn seed_keys(&self) -> Vec<String> {
        match self {
            Dimension::Status => ShipmentStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            Dimension::Incoterm => Incoterm::ALL.iter().map(|i| i.as_str().to_string()).collect(),
            Dimension::Mode => ShipmentMode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            Dimension::Channel => Channel::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            Dimension::Terminal => known_terminals().into_iter().map(str::to_string).collect(),
        }
    }

    /// Bucket key of a record; `None` excludes the record from the view.
    pub fn key_of(&self, record: &ShipmentRecord) -> Option<String> {
        match self {
            Dimension::Status => record.status_kind().map(|s| s.as_str().to_string()),
            Dimension::Incoterm => record.incoterm_kind().map(|i| i.as_str().to_string()),
            Dimension::Mode => record.mode_kind().map(|m| m.as_str().to_string()),
            Dimension::Channel => record.channel_kind().map(|c| c.as_str().to_string()),
            Dimension::Terminal => record
                .terminal
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(normalize_terminal),
        }
    }

    /// Unknown keys open a new bucket only for free-text dimensions
    fn accepts_unknown_keys(&self) -> bool {
        matches!(self, Dimension::Terminal)
    }
}

/// What a bucket's `value` holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    /// One per row
    Count,
    /// Containers of FCL and FCL/LCL rows
    Containers,
    /// Invoice value; with a currency, rows in other currencies are skipped
    InvoiceValue { currency: Option<String> },
    /// Distinct DI numbers
    UniqueDi,
}

impl Measure {
    /// Contribution of one record, `None` when the record does not take part
    fn contribution(&self, record: &ShipmentRecord) -> Option<f64> {
        match self {
            Measure::Count | Measure::UniqueDi => Some(1.0),
            Measure::Containers => Some(record.container_count() as f64),
            Measure::InvoiceValue { currency } => {
                if let Some(wanted) = currency {
                    let own = record.currency.as_deref().map(|c| c.trim().to_uppercase());
                    if own.as_deref() != Some(wanted.trim().to_uppercase().as_str()) {
                        return None;
                    }
                }
                Some(record.invoice_value.unwrap_or(0.0))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    /// Accumulated measure
    pub value: f64,
    /// Contributing rows
    pub count: usize,
    /// Distinct DI numbers among the rows
    pub unique_di: usize,
    /// Contributing rows for drill-down
    pub records: Vec<ShipmentRecord>,
}

impl Bucket {
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: 0.0,
            count: 0,
            unique_di: 0,
            records: Vec::new(),
        }
    }
}

/// Group records by `dimension`, accumulating `measure`.
///
/// Seeded buckets are always emitted (zero when empty) in declaration
/// order; unknown terminals follow in first-seen order.
pub fn aggregate<'a, I>(records: I, dimension: Dimension, measure: &Measure) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a ShipmentRecord>,
{
    let mut buckets: Vec<Bucket> = dimension.seed_keys().into_iter().map(Bucket::empty).collect();
    let mut di_sets: Vec<HashSet<String>> = vec![HashSet::new(); buckets.len()];

    for record in records {
        let Some(key) = dimension.key_of(record) else {
            continue;
        };
        let Some(amount) = measure.contribution(record) else {
            continue;
        };

        let idx = match buckets.iter().position(|b| b.key == key) {
            Some(idx) => idx,
            None if dimension.accepts_unknown_keys() => {
                buckets.push(Bucket::empty(key));
                di_sets.push(HashSet::new());
                buckets.len() - 1
            }
            None => continue,
        };

        let bucket = &mut buckets[idx];
        bucket.count += 1;
        bucket.records.push(record.clone());
        if let Some(di) = record.di_key() {
            di_sets[idx].insert(di.to_string());
        }
        if *measure != Measure::UniqueDi {
            bucket.value += amount;
        }
    }

    for (bucket, dis) in buckets.iter_mut().zip(di_sets) {
        bucket.unique_di = dis.len();
        if *measure == Measure::UniqueDi {
            bucket.value = bucket.unique_di as f64;
        }
    }
    buckets
}

/// Sum of all bucket values, zero buckets included
pub fn total_value(buckets: &[Bucket]) -> f64 {
    buckets.iter().map(|b| b.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str) -> ShipmentRecord {
        ShipmentRecord {
            id: id.into(),
            bl_awb: id.into(),
            ..Default::default()
        }
    }

    fn with_status(id: &str, status: Option<&str>) -> ShipmentRecord {
        ShipmentRecord {
            status: status.map(String::from),
            ..rec(id)
        }
    }

    fn find<'a>(buckets: &'a [Bucket], key: &str) -> &'a Bucket {
        buckets.iter().find(|b| b.key == key).unwrap()
    }

    #[test]
    fn test_status_counts_cover_recognized_records() {
        let records = vec![
            with_status("1", Some("IN TRANSIT")),
            with_status("2", Some("cargo ready")),
            with_status("3", Some("AT THE PORT")),
            with_status("4", Some("ON HOLD")),
            with_status("5", None),
            with_status("6", Some("CARGO DELIVERED")),
        ];
        let buckets = aggregate(&records, Dimension::Status, &Measure::Count);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["IN TRANSIT", "AT THE PORT", "DI REGISTERED", "CARGO CLEARED", "CARGO DELIVERED"]
        );
        let recognized = records.iter().filter(|r| r.status_kind().is_some()).count();
        let sum: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(sum, recognized);
        assert_eq!(sum, 4);
        assert_eq!(find(&buckets, "AT THE PORT").value, 2.0);
        assert_eq!(find(&buckets, "DI REGISTERED").value, 0.0);
    }

    #[test]
    fn test_lcl_containers_are_zero_but_member() {
        let records = vec![
            ShipmentRecord {
                mode: Some("LCL".into()),
                fcl: Some(9),
                ..rec("1")
            },
            ShipmentRecord {
                mode: Some("FCL".into()),
                fcl: Some(2),
                ..rec("2")
            },
        ];
        let buckets = aggregate(&records, Dimension::Mode, &Measure::Containers);
        let lcl = find(&buckets, "LCL");
        assert_eq!(lcl.value, 0.0);
        assert_eq!(lcl.count, 1);
        assert_eq!(find(&buckets, "FCL").value, 2.0);
    }

    #[test]
    fn test_same_di_same_channel_counts_once() {
        let make = |id: &str| ShipmentRecord {
            di_number: Some("24/0001234-5".into()),
            channel: Some("GREEN".into()),
            ..rec(id)
        };
        let two = vec![make("1"), make("2")];
        let empty: Vec<ShipmentRecord> = Vec::new();
        let base = aggregate(&empty, Dimension::Channel, &Measure::Count);
        let counted = aggregate(&two, Dimension::Channel, &Measure::Count);
        assert_eq!(find(&counted, "GREEN").count - find(&base, "GREEN").count, 2);
        assert_eq!(find(&counted, "GREEN").unique_di - find(&base, "GREEN").unique_di, 1);

        let unique = aggregate(&two, Dimension::Channel, &Measure::UniqueDi);
        assert_eq!(find(&unique, "GREEN").value, 1.0);
    }

    #[test]
    fn test_terminal_buckets_seeded_then_first_seen() {
        let records = vec![
            ShipmentRecord {
                terminal: Some("Armazém Z".into()),
                ..rec("1")
            },
            ShipmentRecord {
                terminal: Some("Terminal Itapoá".into()),
                ..rec("2")
            },
            ShipmentRecord {
                terminal: Some("Armazém A".into()),
                ..rec("3")
            },
            ShipmentRecord {
                terminal: Some("  ".into()),
                ..rec("4")
            },
            rec("5"),
        ];
        let buckets = aggregate(&records, Dimension::Terminal, &Measure::Count);
        let known = known_terminals().len();
        assert_eq!(buckets.len(), known + 2);
        assert_eq!(buckets[known].key, "Armazém Z");
        assert_eq!(buckets[known + 1].key, "Armazém A");
        assert_eq!(find(&buckets, "ITAPOA").count, 1);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_unknown_incoterm_is_excluded() {
        let records = vec![
            ShipmentRecord {
                incoterm: Some("FOB".into()),
                ..rec("1")
            },
            ShipmentRecord {
                incoterm: Some("XYZ".into()),
                ..rec("2")
            },
        ];
        let buckets = aggregate(&records, Dimension::Incoterm, &Measure::Count);
        assert_eq!(buckets.len(), 11);
        assert_eq!(total_value(&buckets), 1.0);
    }

    #[test]
    fn test_invoice_value_single_currency() {
        let records = vec![
            ShipmentRecord {
                incoterm: Some("FOB".into()),
                invoice_value: Some(100.0),
                currency: Some("usd".into()),
                ..rec("1")
            },
            ShipmentRecord {
                incoterm: Some("FOB".into()),
                invoice_value: Some(50.0),
                currency: Some("EUR".into()),
                ..rec("2")
            },
        ];
        let usd = aggregate(
            &records,
            Dimension::Incoterm,
            &Measure::InvoiceValue {
                currency: Some("USD".into()),
            },
        );
        let fob = find(&usd, "FOB");
        assert_eq!(fob.value, 100.0);
        assert_eq!(fob.count, 1);
    }
}
