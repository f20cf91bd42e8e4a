pub mod common;
pub mod d400_transit;
pub mod d401_operation;
pub mod d402_performance;
pub mod d403_brokerage;
