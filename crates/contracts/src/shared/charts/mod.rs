//! Presentation math for the SVG charts

pub mod bar;
pub mod doughnut;
pub mod line;
pub mod palette;

pub use bar::{nice_ticks, stacked_bars, StackSeries, StackedBars};
pub use doughnut::{doughnut_arcs, sector_path, ArcSegment, Slice};
pub use line::{line_points, polyline_path, ZoomWindow};
pub use palette::{color_for, terminal_color, FALLBACK_COLOR};
