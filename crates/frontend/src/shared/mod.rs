pub mod api_utils;
pub mod charts;
pub mod components;
pub mod excel_importer;
pub mod export;
pub mod icons;
pub mod modal_frame;
pub mod page_frame;
