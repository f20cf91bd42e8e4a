pub mod cell;
pub mod mapper;
pub mod request;
pub mod response;

pub use cell::{normalize_date_cell, parse_number, serial_to_date, Cell};
pub use mapper::{map_sheet, ImportError, ImportField, ImportOutcome, ImportPreview};
pub use request::ImportBatchRequest;
pub use response::ImportBatchResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportShipments;

impl UseCaseMetadata for ImportShipments {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_shipments"
    }

    fn display_name() -> &'static str {
        "Importar embarques"
    }

    fn description() -> &'static str {
        "Carga de embarques a partir de planilha .xlsx/.xls"
    }
}
