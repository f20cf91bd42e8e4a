//! Line chart geometry and the zoom window over the time index.

use serde::{Deserialize, Serialize};

pub const ZOOM_FACTOR: f64 = 1.5;
pub const MIN_ZOOM_POINTS: usize = 2;

/// Visible index range `[start, end)` over a series of `len` points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

impl ZoomWindow {
    /// Window showing the full series
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len, len }
    }

    pub fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn is_full(&self) -> bool {
        self.start == 0 && self.end == self.len
    }

    fn centered(&self, width: usize) -> Self {
        let width = width.min(self.len);
        let mid = (self.start + self.end) as f64 / 2.0;
        let max_start = self.len - width;
        let start = (mid - width as f64 / 2.0).round().clamp(0.0, max_start as f64) as usize;
        Self {
            start,
            end: start + width,
            len: self.len,
        }
    }

    /// Width divided by 1.5 (floored, never under two points), recentered
    pub fn zoom_in(&self) -> Self {
        let target = ((self.width() as f64 / ZOOM_FACTOR).floor() as usize).max(MIN_ZOOM_POINTS);
        self.centered(target)
    }

    /// Width multiplied by 1.5, capped at the full series, recentered
    pub fn zoom_out(&self) -> Self {
        let target = ((self.width() as f64 * ZOOM_FACTOR).floor() as usize).min(self.len);
        self.centered(target)
    }

    /// Shift by `delta` points, kept inside the series
    pub fn pan(&self, delta: isize) -> Self {
        let max_start = (self.len - self.width()) as isize;
        let start = (self.start as isize + delta).clamp(0, max_start) as usize;
        Self {
            start,
            end: start + self.width(),
            len: self.len,
        }
    }

    pub fn reset(&self) -> Self {
        Self::full(self.len)
    }
}

/// Screen coordinates of `values`, spread over `width` and scaled so that
/// `max` touches the top.
pub fn line_points(values: &[f64], width: f64, height: f64, max: f64) -> Vec<(f64, f64)> {
    let n = values.len();
    let step = if n > 1 { width / (n - 1) as f64 } else { 0.0 };
    let scale = if max > 0.0 { height / max } else { 0.0 };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n > 1 { i as f64 * step } else { width / 2.0 };
            (x, height - v.max(0.0) * scale)
        })
        .collect()
}

/// SVG `d` attribute for a polyline through the points
pub fn polyline_path(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{x:.2} {y:.2}", if i == 0 { "M " } else { "L " }))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_floors_and_recenters() {
        let w = ZoomWindow::full(12).zoom_in();
        assert_eq!(w.width(), 8);
        assert_eq!((w.start, w.end), (2, 10));
        let w = w.zoom_in();
        assert_eq!(w.width(), 5);
        let w = w.zoom_in().zoom_in().zoom_in();
        assert_eq!(w.width(), 2);
    }

    #[test]
    fn test_zoom_out_caps_at_full() {
        let w = ZoomWindow::full(12).zoom_in().zoom_in();
        let out = w.zoom_out();
        assert_eq!(out.width(), 7);
        assert!(out.end <= 12);
        let full = out.zoom_out().zoom_out();
        assert!(full.is_full());
        assert_eq!(full.zoom_out(), full);
    }

    #[test]
    fn test_pan_stays_in_bounds() {
        let w = ZoomWindow::full(12).zoom_in();
        assert_eq!(w.pan(-10).start, 0);
        assert_eq!(w.pan(10).end, 12);
        assert_eq!(w.pan(1).start, w.start + 1);
        assert_eq!(w.pan(3).reset(), ZoomWindow::full(12));
    }

    #[test]
    fn test_line_points_scale() {
        let pts = line_points(&[0.0, 5.0, 10.0], 100.0, 50.0, 10.0);
        assert_eq!(pts[0], (0.0, 50.0));
        assert_eq!(pts[1], (50.0, 25.0));
        assert_eq!(pts[2], (100.0, 0.0));
        assert!(polyline_path(&pts).starts_with("M 0.00 50.00 L 50.00"));
    }
}
