pub mod aggregate;
pub mod terminal;

pub use aggregate::{
    sanitize_document_ref, Channel, DateField, Incoterm, ShipmentMode, ShipmentPatch,
    ShipmentRecord, ShipmentStatus,
};
pub use terminal::{known_terminals, normalize_terminal};
