pub mod repository;
pub mod service;
pub mod store;

pub use repository::SqliteShipmentStore;
pub use store::{MemoryShipmentStore, ShipmentStore, StoreError};
