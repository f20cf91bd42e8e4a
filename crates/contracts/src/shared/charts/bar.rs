//! Stacked bar geometry.

use serde::{Deserialize, Serialize};

/// One stacked series: a key and one value per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSeries {
    pub key: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    pub key: String,
    pub value: f64,
    /// Top edge in chart coordinates (0 = top of the plot)
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackColumn {
    pub label: String,
    pub total: f64,
    pub segments: Vec<StackSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBars {
    pub columns: Vec<StackColumn>,
    pub max_total: f64,
    /// Pixels per unit
    pub scale: f64,
    pub ticks: Vec<f64>,
}

/// Stack `series` per column label. Scale is `height / max column total`,
/// series without any value are left out.
pub fn stacked_bars(labels: &[String], series: &[StackSeries], height: f64) -> StackedBars {
    let visible: Vec<&StackSeries> = series
        .iter()
        .filter(|s| s.values.iter().any(|v| *v > 0.0))
        .collect();

    let totals: Vec<f64> = (0..labels.len())
        .map(|col| {
            visible
                .iter()
                .map(|s| s.values.get(col).copied().unwrap_or(0.0).max(0.0))
                .sum()
        })
        .collect();
    let max_total = totals.iter().copied().fold(0.0, f64::max);
    let scale = if max_total > 0.0 { height / max_total } else { 0.0 };

    let columns = labels
        .iter()
        .zip(&totals)
        .enumerate()
        .map(|(col, (label, total))| {
            let mut base = height;
            let segments = visible
                .iter()
                .filter_map(|s| {
                    let value = s.values.get(col).copied().unwrap_or(0.0);
                    if value <= 0.0 {
                        return None;
                    }
                    let h = value * scale;
                    base -= h;
                    Some(StackSegment {
                        key: s.key.clone(),
                        value,
                        y: base,
                        height: h,
                    })
                })
                .collect();
            StackColumn {
                label: label.clone(),
                total: *total,
                segments,
            }
        })
        .collect();

    StackedBars {
        columns,
        max_total,
        scale,
        ticks: nice_ticks(max_total, 5),
    }
}

/// Round step (1, 2, 2.5, 5 times a power of ten) splitting `max` into
/// about `count` intervals.
pub fn nice_step(max: f64, count: usize) -> f64 {
    if max <= 0.0 || count == 0 {
        return 1.0;
    }
    let raw = max / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Axis ticks from zero up to `max` inclusive
pub fn nice_ticks(max: f64, count: usize) -> Vec<f64> {
    if max <= 0.0 {
        return vec![0.0];
    }
    let step = nice_step(max, count);
    let mut ticks = Vec::new();
    let mut i = 0u32;
    loop {
        let t = step * i as f64;
        if t > max + step * 1e-9 {
            break;
        }
        ticks.push(t);
        i += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_totals_and_scale() {
        let labels = vec!["Jan".to_string(), "Fev".to_string()];
        let series = vec![
            StackSeries {
                key: "A".into(),
                values: vec![2.0, 1.0],
            },
            StackSeries {
                key: "B".into(),
                values: vec![2.0, 0.0],
            },
            StackSeries {
                key: "EMPTY".into(),
                values: vec![0.0, 0.0],
            },
        ];
        let bars = stacked_bars(&labels, &series, 200.0);
        assert_eq!(bars.max_total, 4.0);
        assert_eq!(bars.scale, 50.0);
        let jan = &bars.columns[0];
        assert_eq!(jan.total, 4.0);
        assert_eq!(jan.segments.len(), 2);
        assert_eq!(jan.segments[0].y, 100.0);
        assert_eq!(jan.segments[1].y, 0.0);
        assert_eq!(bars.columns[1].segments.len(), 1);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_step(37.0, 5), 10.0);
        assert_eq!(nice_step(12.0, 5), 2.5);
        assert_eq!(nice_ticks(0.0, 5), vec![0.0]);
    }
}
