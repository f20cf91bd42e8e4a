//! Types and pure logic shared by the backend and the frontend: the shipment
//! model, the spreadsheet mapper, the aggregation pipeline and chart math.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
