//! Sheet -> `ShipmentPatch` mapping.
//!
//! Header cells are lowercased and stripped of whitespace, then looked up in
//! [`COLUMN_PATTERNS`] once per column: the first pattern contained in the
//! header decides the target field. The two-letter patterns only match at
//! the start of the header. Several columns may land on the same
//! field; within a row the later column overwrites the earlier one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::{normalize_date_cell, parse_count, parse_number, Cell};
use crate::domain::a001_shipment::ShipmentPatch;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImportError {
    #[error("A planilha está vazia")]
    EmptySheet,
    #[error("A primeira linha da planilha não contém cabeçalhos")]
    MissingHeaderRow,
    #[error("Nenhuma coluna BL/AWB encontrada nos cabeçalhos")]
    MissingReferenceColumn,
}

/// Target field of a sheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportField {
    BlAwb,
    CargoType,
    Mode,
    Fcl,
    Incoterm,
    Status,
    Terminal,
    Eta,
    Etd,
    DiNumber,
    DiRegistrationDate,
    CargoPresenceDate,
    ClearanceDate,
    TruckScheduledDate,
    TruckDeliveryDate,
    NfIssueDate,
    InvoiceValue,
    Currency,
    Channel,
    Supplier,
    Vessel,
}

impl ImportField {
    pub fn label(&self) -> &'static str {
        match self {
            ImportField::BlAwb => "BL/AWB",
            ImportField::CargoType => "Tipo de carga",
            ImportField::Mode => "Modal",
            ImportField::Fcl => "Qtd. FCL",
            ImportField::Incoterm => "Incoterm",
            ImportField::Status => "Status",
            ImportField::Terminal => "Terminal",
            ImportField::Eta => "ETA",
            ImportField::Etd => "ETD",
            ImportField::DiNumber => "Nº DI",
            ImportField::DiRegistrationDate => "Registro DI",
            ImportField::CargoPresenceDate => "Presença de carga",
            ImportField::ClearanceDate => "Desembaraço",
            ImportField::TruckScheduledDate => "Agendamento",
            ImportField::TruckDeliveryDate => "Entrega",
            ImportField::NfIssueDate => "Emissão NF",
            ImportField::InvoiceValue => "Valor da fatura",
            ImportField::Currency => "Moeda",
            ImportField::Channel => "Canal",
            ImportField::Supplier => "Fornecedor",
            ImportField::Vessel => "Navio",
        }
    }
}

/// How a raw cell becomes a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Text,
    Date,
    Number,
    Count,
}

pub struct ColumnPattern {
    pub pattern: &'static str,
    pub field: ImportField,
    pub transform: Transform,
    /// Header must start with the pattern instead of merely containing it
    pub leading: bool,
}

impl ColumnPattern {
    fn matches(&self, key: &str) -> bool {
        if self.leading {
            key.starts_with(self.pattern)
        } else {
            key.contains(self.pattern)
        }
    }
}

const fn col(pattern: &'static str, field: ImportField, transform: Transform) -> ColumnPattern {
    ColumnPattern {
        pattern,
        field,
        transform,
        leading: false,
    }
}

const fn lead(pattern: &'static str, field: ImportField, transform: Transform) -> ColumnPattern {
    ColumnPattern {
        pattern,
        field,
        transform,
        leading: true,
    }
}

/// Ordered pattern table. Specific patterns come before the short generic
/// ones ("di", "bl"), which are anchored so that headers such as
/// "Condição" or "Tabela" stay unmatched.
pub const COLUMN_PATTERNS: &[ColumnPattern] = &[
    col("bl/awb", ImportField::BlAwb, Transform::Text),
    col("blawb", ImportField::BlAwb, Transform::Text),
    col("awb", ImportField::BlAwb, Transform::Text),
    col("conhecimento", ImportField::BlAwb, Transform::Text),
    col("registrodi", ImportField::DiRegistrationDate, Transform::Date),
    col("registrodadi", ImportField::DiRegistrationDate, Transform::Date),
    col("diregistration", ImportField::DiRegistrationDate, Transform::Date),
    col("presença", ImportField::CargoPresenceDate, Transform::Date),
    col("presenca", ImportField::CargoPresenceDate, Transform::Date),
    col("cargopresence", ImportField::CargoPresenceDate, Transform::Date),
    col("desembaraço", ImportField::ClearanceDate, Transform::Date),
    col("desembaraco", ImportField::ClearanceDate, Transform::Date),
    col("clearance", ImportField::ClearanceDate, Transform::Date),
    col("agendamento", ImportField::TruckScheduledDate, Transform::Date),
    col("truckscheduled", ImportField::TruckScheduledDate, Transform::Date),
    col("entrega", ImportField::TruckDeliveryDate, Transform::Date),
    col("truckdelivery", ImportField::TruckDeliveryDate, Transform::Date),
    col("emissãonf", ImportField::NfIssueDate, Transform::Date),
    col("emissaonf", ImportField::NfIssueDate, Transform::Date),
    col("nfissue", ImportField::NfIssueDate, Transform::Date),
    col("eta", ImportField::Eta, Transform::Date),
    col("etd", ImportField::Etd, Transform::Date),
    col("fcl/lcl", ImportField::Mode, Transform::Text),
    col("modal", ImportField::Mode, Transform::Text),
    col("mode", ImportField::Mode, Transform::Text),
    col("qtdcontainer", ImportField::Fcl, Transform::Count),
    col("containers", ImportField::Fcl, Transform::Count),
    col("fcl", ImportField::Fcl, Transform::Count),
    col("incoterm", ImportField::Incoterm, Transform::Text),
    col("status", ImportField::Status, Transform::Text),
    col("terminal", ImportField::Terminal, Transform::Text),
    col("recinto", ImportField::Terminal, Transform::Text),
    col("armazém", ImportField::Terminal, Transform::Text),
    col("armazem", ImportField::Terminal, Transform::Text),
    col("canal", ImportField::Channel, Transform::Text),
    col("channel", ImportField::Channel, Transform::Text),
    col("parametriza", ImportField::Channel, Transform::Text),
    col("moeda", ImportField::Currency, Transform::Text),
    col("currency", ImportField::Currency, Transform::Text),
    col("valor", ImportField::InvoiceValue, Transform::Number),
    col("invoice", ImportField::InvoiceValue, Transform::Number),
    col("fornecedor", ImportField::Supplier, Transform::Text),
    col("supplier", ImportField::Supplier, Transform::Text),
    col("exportador", ImportField::Supplier, Transform::Text),
    col("navio", ImportField::Vessel, Transform::Text),
    col("vessel", ImportField::Vessel, Transform::Text),
    col("tipodecarga", ImportField::CargoType, Transform::Text),
    col("cargotype", ImportField::CargoType, Transform::Text),
    col("carga", ImportField::CargoType, Transform::Text),
    col("nºdi", ImportField::DiNumber, Transform::Text),
    col("n°di", ImportField::DiNumber, Transform::Text),
    col("ndi", ImportField::DiNumber, Transform::Text),
    col("númerodadi", ImportField::DiNumber, Transform::Text),
    col("numerodadi", ImportField::DiNumber, Transform::Text),
    col("númerodi", ImportField::DiNumber, Transform::Text),
    col("numerodi", ImportField::DiNumber, Transform::Text),
    col("dinumber", ImportField::DiNumber, Transform::Text),
    lead("di", ImportField::DiNumber, Transform::Text),
    lead("bl", ImportField::BlAwb, Transform::Text),
];

/// Lowercase with every whitespace character removed
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// First table entry whose pattern is contained in the header
pub fn match_header(header: &str) -> Option<&'static ColumnPattern> {
    let key = normalize_header(header);
    if key.is_empty() {
        return None;
    }
    COLUMN_PATTERNS.iter().find(|p| p.matches(&key))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub column: usize,
    pub header: String,
    pub field: ImportField,
}

/// What the mapper did with a sheet, shown before the batch is committed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportPreview {
    pub mapped: Vec<ColumnMapping>,
    pub unmatched_headers: Vec<String>,
    pub kept_rows: usize,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportOutcome {
    pub patches: Vec<ShipmentPatch>,
    pub preview: ImportPreview,
}

enum Value {
    Text(Option<String>),
    Number(Option<f64>),
    Count(Option<u32>),
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn apply_transform(transform: Transform, cell: &Cell) -> Value {
    match transform {
        Transform::Text => Value::Text(non_empty(cell.as_text())),
        Transform::Date => Value::Text(non_empty(normalize_date_cell(cell))),
        Transform::Number => Value::Number(parse_number(cell)),
        Transform::Count => Value::Count(parse_count(cell)),
    }
}

fn assign(patch: &mut ShipmentPatch, field: ImportField, value: Value) {
    let text = |v: Value| match v {
        Value::Text(t) => t,
        Value::Number(n) => n.map(|n| n.to_string()),
        Value::Count(c) => c.map(|c| c.to_string()),
    };
    match field {
        ImportField::BlAwb => patch.bl_awb = text(value).unwrap_or_default(),
        ImportField::Fcl => {
            patch.fcl = match value {
                Value::Count(c) => c,
                _ => None,
            }
        }
        ImportField::InvoiceValue => {
            patch.invoice_value = match value {
                Value::Number(n) => n,
                _ => None,
            }
        }
        ImportField::CargoType => patch.cargo_type = text(value),
        ImportField::Mode => patch.mode = text(value),
        ImportField::Incoterm => patch.incoterm = text(value),
        ImportField::Status => patch.status = text(value),
        ImportField::Terminal => patch.terminal = text(value),
        ImportField::Eta => patch.eta = text(value),
        ImportField::Etd => patch.etd = text(value),
        ImportField::DiNumber => patch.di_number = text(value),
        ImportField::DiRegistrationDate => patch.di_registration_date = text(value),
        ImportField::CargoPresenceDate => patch.cargo_presence_date = text(value),
        ImportField::ClearanceDate => patch.clearance_date = text(value),
        ImportField::TruckScheduledDate => patch.truck_scheduled_date = text(value),
        ImportField::TruckDeliveryDate => patch.truck_delivery_date = text(value),
        ImportField::NfIssueDate => patch.nf_issue_date = text(value),
        ImportField::Currency => patch.currency = text(value),
        ImportField::Channel => patch.channel = text(value),
        ImportField::Supplier => patch.supplier = text(value),
        ImportField::Vessel => patch.vessel = text(value),
    }
}

/// Map a sheet (first row = headers) to shipment patches.
///
/// Rows whose BL/AWB is empty after mapping are dropped; nothing else is
/// validated. Fully blank rows are skipped without being counted as dropped.
pub fn map_sheet(rows: &[Vec<Cell>]) -> Result<ImportOutcome, ImportError> {
    let (header_row, body) = rows.split_first().ok_or(ImportError::EmptySheet)?;
    if header_row.iter().all(Cell::is_blank) {
        return Err(ImportError::MissingHeaderRow);
    }

    let mut preview = ImportPreview::default();
    let mut columns: Vec<(usize, &'static ColumnPattern)> = Vec::new();
    for (idx, cell) in header_row.iter().enumerate() {
        let header = cell.as_text();
        if header.is_empty() {
            continue;
        }
        match match_header(&header) {
            Some(pattern) => {
                columns.push((idx, pattern));
                preview.mapped.push(ColumnMapping {
                    column: idx,
                    header,
                    field: pattern.field,
                });
            }
            None => preview.unmatched_headers.push(header),
        }
    }

    if !columns.iter().any(|(_, p)| p.field == ImportField::BlAwb) {
        return Err(ImportError::MissingReferenceColumn);
    }

    let mut patches = Vec::new();
    for row in body {
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        let mut patch = ShipmentPatch::default();
        for (idx, pattern) in &columns {
            let cell = row.get(*idx).cloned().unwrap_or_default();
            assign(&mut patch, pattern.field, apply_transform(pattern.transform, &cell));
        }
        if patch.bl_awb.trim().is_empty() {
            preview.dropped_rows += 1;
            continue;
        }
        patch.bl_awb = patch.bl_awb.trim().to_string();
        patches.push(patch);
    }
    preview.kept_rows = patches.len();

    log::info!(
        "Sheet mapped: {} columns, {} rows kept, {} dropped, unmatched headers: {:?}",
        preview.mapped.len(),
        preview.kept_rows,
        preview.dropped_rows,
        preview.unmatched_headers
    );

    Ok(ImportOutcome { patches, preview })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Cell {
        Cell::text(s)
    }

    #[test]
    fn test_header_matching_order() {
        assert_eq!(match_header("BL/AWB").unwrap().field, ImportField::BlAwb);
        assert_eq!(match_header("Data Registro DI").unwrap().field, ImportField::DiRegistrationDate);
        assert_eq!(match_header("Nº DI").unwrap().field, ImportField::DiNumber);
        assert_eq!(match_header("Presença de Carga").unwrap().field, ImportField::CargoPresenceDate);
        assert_eq!(match_header("Modalidade").unwrap().field, ImportField::Mode);
        assert_eq!(match_header("FCL / LCL").unwrap().field, ImportField::Mode);
        assert_eq!(match_header("Qtd FCL").unwrap().field, ImportField::Fcl);
        assert_eq!(match_header(" E T A ").unwrap().field, ImportField::Eta);
        assert_eq!(match_header("Valor Fatura").unwrap().field, ImportField::InvoiceValue);
        assert!(match_header("Observações").is_none());
        assert_eq!(match_header("Número da DI").unwrap().field, ImportField::DiNumber);
        assert_eq!(match_header("DI").unwrap().field, ImportField::DiNumber);
        assert_eq!(match_header("BL Master").unwrap().field, ImportField::BlAwb);
        assert!(match_header("   ").is_none());
    }

    #[test]
    fn test_reference_only_row_is_kept() {
        let rows = vec![
            vec![t("BL/AWB"), t("ETA"), t("Status")],
            vec![t("MSCU/123"), Cell::Empty, t("")],
        ];
        let out = map_sheet(&rows).unwrap();
        assert_eq!(out.patches.len(), 1);
        let expected = ShipmentPatch {
            bl_awb: "MSCU/123".into(),
            ..Default::default()
        };
        assert_eq!(out.patches[0], expected);
        assert_eq!(out.patches[0].document_id(), "MSCU-123");
    }

    #[test]
    fn test_row_without_reference_is_dropped() {
        let rows = vec![
            vec![t("BL/AWB"), t("ETA"), t("Status"), t("Terminal")],
            vec![t("  "), Cell::Number(45000.0), t("IN TRANSIT"), t("Portonave")],
            vec![t("ABC1"), Cell::Number(45000.0), t("IN TRANSIT"), t("Portonave")],
        ];
        let out = map_sheet(&rows).unwrap();
        assert_eq!(out.patches.len(), 1);
        assert_eq!(out.patches[0].bl_awb, "ABC1");
        assert_eq!(out.patches[0].eta.as_deref(), Some("2023-03-15"));
        assert_eq!(out.preview.kept_rows, 1);
        assert_eq!(out.preview.dropped_rows, 1);
    }

    #[test]
    fn test_later_column_overwrites_earlier() {
        let rows = vec![
            vec![t("ETA"), t("BL"), t("ETA Atualizado")],
            vec![t("01/02/2024"), t("X1"), t("10/02/2024")],
            vec![t("01/02/2024"), t("X2"), Cell::Empty],
        ];
        let out = map_sheet(&rows).unwrap();
        assert_eq!(out.patches[0].eta.as_deref(), Some("2024-02-10"));
        // a blank later column still wins
        assert_eq!(out.patches[1].eta, None);
    }

    #[test]
    fn test_unrelated_header_does_not_overwrite_di_number() {
        let rows = vec![
            vec![t("BL/AWB"), t("Nº DI"), t("Condição de pagamento"), t("Tabela")],
            vec![t("B1"), t("24/0123456-7"), t("30 dias"), t("T1")],
        ];
        let out = map_sheet(&rows).unwrap();
        assert_eq!(out.patches[0].bl_awb, "B1");
        assert_eq!(out.patches[0].di_number.as_deref(), Some("24/0123456-7"));
        assert_eq!(
            out.preview.unmatched_headers,
            vec!["Condição de pagamento".to_string(), "Tabela".to_string()]
        );
    }

    #[test]
    fn test_typed_columns() {
        let rows = vec![
            vec![t("BL/AWB"), t("Qtd FCL"), t("Valor"), t("Moeda"), t("Canal")],
            vec![t("B1"), Cell::Number(2.0), t("1.500,75"), t("USD"), t("Verde")],
        ];
        let out = map_sheet(&rows).unwrap();
        let p = &out.patches[0];
        assert_eq!(p.fcl, Some(2));
        assert_eq!(p.invoice_value, Some(1500.75));
        assert_eq!(p.currency.as_deref(), Some("USD"));
        assert_eq!(p.channel.as_deref(), Some("Verde"));
    }

    #[test]
    fn test_preview_lists_unmatched_headers() {
        let rows = vec![
            vec![t("BL/AWB"), t("Observações"), Cell::Empty],
            vec![t("B1"), t("x"), Cell::Empty],
            vec![Cell::Empty, Cell::Empty, Cell::Empty],
        ];
        let out = map_sheet(&rows).unwrap();
        assert_eq!(out.preview.unmatched_headers, vec!["Observações".to_string()]);
        assert_eq!(out.preview.mapped.len(), 1);
        assert_eq!(out.preview.dropped_rows, 0);
    }

    #[test]
    fn test_sheet_level_errors() {
        assert_eq!(map_sheet(&[]), Err(ImportError::EmptySheet));
        assert_eq!(
            map_sheet(&[vec![Cell::Empty, t(" ")]]),
            Err(ImportError::MissingHeaderRow)
        );
        assert_eq!(
            map_sheet(&[vec![t("ETA")], vec![t("01/01/2024")]]),
            Err(ImportError::MissingReferenceColumn)
        );
    }
}
