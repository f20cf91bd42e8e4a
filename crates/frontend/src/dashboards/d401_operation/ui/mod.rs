pub mod dashboard;

pub use dashboard::OperationPage;
