pub mod ui;

pub use ui::OperationPage;
