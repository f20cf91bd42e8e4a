pub mod parser;
pub mod widget;

pub use widget::ShipmentUploadModal;
