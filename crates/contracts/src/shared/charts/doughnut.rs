//! Doughnut geometry. Angles are degrees, clockwise from 12 o'clock.

use serde::{Deserialize, Serialize};

/// Key/value pair fed to a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub key: String,
    pub value: f64,
}

impl Slice {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub key: String,
    pub value: f64,
    /// Share of the total, 0..=1
    pub share: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Arcs for the non-zero slices in descending value order, each starting
/// where the previous one ended.
pub fn doughnut_arcs(slices: &[Slice]) -> Vec<ArcSegment> {
    let mut visible: Vec<&Slice> = slices.iter().filter(|s| s.value > 0.0).collect();
    visible.sort_by(|a, b| b.value.total_cmp(&a.value));
    let total: f64 = visible.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut offset = 0.0;
    visible
        .into_iter()
        .map(|s| {
            let share = s.value / total;
            let sweep = share * 360.0;
            let arc = ArcSegment {
                key: s.key.clone(),
                value: s.value,
                share,
                start_deg: offset,
                end_deg: offset + sweep,
            };
            offset += sweep;
            arc
        })
        .collect()
}

/// Point on a circle at `deg` (0 = top, clockwise)
pub fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + r * rad.sin(), cy - r * rad.cos())
}

/// SVG path of an annular sector between two angles.
///
/// A full turn is drawn as two half sectors since an SVG arc cannot start
/// and end on the same point.
pub fn sector_path(cx: f64, cy: f64, outer: f64, inner: f64, start_deg: f64, end_deg: f64) -> String {
    let sweep = end_deg - start_deg;
    if sweep >= 359.999 {
        let mid = start_deg + 180.0;
        return format!(
            "{} {}",
            sector_path(cx, cy, outer, inner, start_deg, mid),
            sector_path(cx, cy, outer, inner, mid, start_deg + 360.0)
        );
    }

    let large = if sweep > 180.0 { 1 } else { 0 };
    let (ox1, oy1) = polar(cx, cy, outer, start_deg);
    let (ox2, oy2) = polar(cx, cy, outer, end_deg);
    let (ix2, iy2) = polar(cx, cy, inner, end_deg);
    let (ix1, iy1) = polar(cx, cy, inner, start_deg);
    format!(
        "M {ox1:.3} {oy1:.3} A {outer} {outer} 0 {large} 1 {ox2:.3} {oy2:.3} \
         L {ix2:.3} {iy2:.3} A {inner} {inner} 0 {large} 0 {ix1:.3} {iy1:.3} Z"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcs_sorted_and_accumulated() {
        let slices = vec![
            Slice::new("a", 1.0),
            Slice::new("zero", 0.0),
            Slice::new("b", 3.0),
        ];
        let arcs = doughnut_arcs(&slices);
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].key, "b");
        assert_eq!(arcs[0].start_deg, 0.0);
        assert!((arcs[0].end_deg - 270.0).abs() < 1e-9);
        assert!((arcs[1].start_deg - 270.0).abs() < 1e-9);
        assert!((arcs[1].end_deg - 360.0).abs() < 1e-9);
        assert!((arcs.iter().map(|a| a.share).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_total_gives_no_arcs() {
        assert!(doughnut_arcs(&[Slice::new("a", 0.0)]).is_empty());
        assert!(doughnut_arcs(&[]).is_empty());
    }

    #[test]
    fn test_polar_origin_is_top() {
        let (x, y) = polar(50.0, 50.0, 10.0, 0.0);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 40.0).abs() < 1e-9);
        let (x, y) = polar(50.0, 50.0, 10.0, 90.0);
        assert!((x - 60.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_circle_path_is_split() {
        let path = sector_path(50.0, 50.0, 40.0, 25.0, 0.0, 360.0);
        assert_eq!(path.matches('M').count(), 2);
        let half = sector_path(50.0, 50.0, 40.0, 25.0, 0.0, 200.0);
        assert!(half.contains(" 0 1 1 "));
    }
}
