pub mod charts;
pub mod date_utils;
