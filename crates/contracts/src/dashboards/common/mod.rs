//! Filtering, grouping and page state shared by every dashboard page

pub mod bucket;
pub mod filter;
pub mod kpi;
pub mod series;
pub mod state;

pub use bucket::{aggregate, total_value, Bucket, Dimension, Measure};
pub use filter::{MonthFilter, ShipmentFilter, YearFilter};
pub use kpi::ShipmentKpis;
pub use series::{
    monthly_containers_by_terminal, monthly_mean_duration, monthly_unique_di, MonthRange,
    SeriesPoint, TerminalSeries, FISCAL_SLICE_OFFSET,
};
pub use state::{reduce, DashboardAction, DashboardState, DrillDown, LoadState, Page};
