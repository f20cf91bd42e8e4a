pub mod ui;

pub use ui::PerformancePage;
