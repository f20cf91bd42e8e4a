pub mod dashboard;

pub use dashboard::PerformancePage;
