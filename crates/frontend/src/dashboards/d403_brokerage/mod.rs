pub mod ui;

pub use ui::BrokeragePage;
