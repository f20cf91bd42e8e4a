use serde::{Deserialize, Serialize};

// ============================================================================
// Document key
// ============================================================================

/// Document key for a carrier reference: every `/` becomes `-`.
///
/// "MSCU/1234/56" -> "MSCU-1234-56"
pub fn sanitize_document_ref(bl_awb: &str) -> String {
    bl_awb.trim().replace('/', "-")
}

// ============================================================================
// Aggregate
// ============================================================================

/// Import shipment as stored in the document store.
///
/// Dates are normalized `YYYY-MM-DD` strings. Enumerated attributes (status,
/// mode, incoterm, channel) stay as free text here; the typed views below are
/// parsed on demand so unknown values never break a fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: String,
    pub bl_awb: String,
    pub cargo_type: Option<String>,
    pub mode: Option<String>,
    pub fcl: Option<u32>,
    pub incoterm: Option<String>,
    pub status: Option<String>,
    pub terminal: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub di_number: Option<String>,
    pub di_registration_date: Option<String>,
    pub cargo_presence_date: Option<String>,
    pub clearance_date: Option<String>,
    pub truck_scheduled_date: Option<String>,
    pub truck_delivery_date: Option<String>,
    pub nf_issue_date: Option<String>,
    pub invoice_value: Option<f64>,
    pub currency: Option<String>,
    pub channel: Option<String>,
    pub supplier: Option<String>,
    pub vessel: Option<String>,
    pub updated_at: Option<String>,
}

/// Partial record produced by the spreadsheet import.
///
/// `None` means "not present in the sheet" and never overwrites a stored
/// value during the merge upsert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentPatch {
    pub bl_awb: String,
    pub cargo_type: Option<String>,
    pub mode: Option<String>,
    pub fcl: Option<u32>,
    pub incoterm: Option<String>,
    pub status: Option<String>,
    pub terminal: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub di_number: Option<String>,
    pub di_registration_date: Option<String>,
    pub cargo_presence_date: Option<String>,
    pub clearance_date: Option<String>,
    pub truck_scheduled_date: Option<String>,
    pub truck_delivery_date: Option<String>,
    pub nf_issue_date: Option<String>,
    pub invoice_value: Option<f64>,
    pub currency: Option<String>,
    pub channel: Option<String>,
    pub supplier: Option<String>,
    pub vessel: Option<String>,
}

impl ShipmentPatch {
    pub fn document_id(&self) -> String {
        sanitize_document_ref(&self.bl_awb)
    }
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field.clone();
            }
        )+
    };
}

impl ShipmentRecord {
    /// New record from the first patch seen for a document key
    pub fn from_patch(patch: &ShipmentPatch) -> Self {
        let mut record = ShipmentRecord {
            id: patch.document_id(),
            bl_awb: patch.bl_awb.trim().to_string(),
            ..Default::default()
        };
        record.merge(patch);
        record
    }

    /// Merge-upsert semantics: every field present in the patch replaces the
    /// stored value, absent fields are left untouched.
    pub fn merge(&mut self, patch: &ShipmentPatch) {
        merge_fields!(
            self,
            patch,
            cargo_type,
            mode,
            fcl,
            incoterm,
            status,
            terminal,
            eta,
            etd,
            di_number,
            di_registration_date,
            cargo_presence_date,
            clearance_date,
            truck_scheduled_date,
            truck_delivery_date,
            nf_issue_date,
            invoice_value,
            currency,
            channel,
            supplier,
            vessel,
        );
    }

    pub fn status_kind(&self) -> Option<ShipmentStatus> {
        self.status.as_deref().and_then(ShipmentStatus::parse)
    }

    pub fn mode_kind(&self) -> Option<ShipmentMode> {
        self.mode.as_deref().and_then(ShipmentMode::parse)
    }

    pub fn incoterm_kind(&self) -> Option<Incoterm> {
        self.incoterm.as_deref().and_then(Incoterm::parse)
    }

    pub fn channel_kind(&self) -> Option<Channel> {
        self.channel.as_deref().and_then(Channel::parse)
    }

    /// Containers counted towards volume aggregates.
    ///
    /// Only FCL and FCL/LCL shipments carry containers; any other mode
    /// contributes zero whatever its `fcl` column says.
    pub fn container_count(&self) -> u32 {
        match self.mode_kind() {
            Some(ShipmentMode::Fcl) | Some(ShipmentMode::FclLcl) => self.fcl.unwrap_or(0),
            _ => 0,
        }
    }

    /// DI number trimmed, `None` when blank
    pub fn di_key(&self) -> Option<&str> {
        self.di_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Raw value of a date field
    pub fn date(&self, field: DateField) -> Option<&str> {
        let v = match field {
            DateField::Eta => &self.eta,
            DateField::Etd => &self.etd,
            DateField::DiRegistration => &self.di_registration_date,
            DateField::CargoPresence => &self.cargo_presence_date,
            DateField::Clearance => &self.clearance_date,
            DateField::TruckScheduled => &self.truck_scheduled_date,
            DateField::TruckDelivery => &self.truck_delivery_date,
            DateField::NfIssue => &self.nf_issue_date,
        };
        v.as_deref().filter(|s| !s.trim().is_empty())
    }
}

// ============================================================================
// Date fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateField {
    Eta,
    Etd,
    DiRegistration,
    CargoPresence,
    Clearance,
    TruckScheduled,
    TruckDelivery,
    NfIssue,
}

impl DateField {
    pub fn label(&self) -> &'static str {
        match self {
            DateField::Eta => "ETA",
            DateField::Etd => "ETD",
            DateField::DiRegistration => "Registro DI",
            DateField::CargoPresence => "Presença de carga",
            DateField::Clearance => "Desembaraço",
            DateField::TruckScheduled => "Agendamento",
            DateField::TruckDelivery => "Entrega",
            DateField::NfIssue => "Emissão NF",
        }
    }
}

// ============================================================================
// Lifecycle status
// ============================================================================

/// Lifecycle status, declared in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipmentStatus {
    InTransit,
    AtThePort,
    DiRegistered,
    CargoCleared,
    CargoDelivered,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::InTransit,
        ShipmentStatus::AtThePort,
        ShipmentStatus::DiRegistered,
        ShipmentStatus::CargoCleared,
        ShipmentStatus::CargoDelivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::InTransit => "IN TRANSIT",
            ShipmentStatus::AtThePort => "AT THE PORT",
            ShipmentStatus::DiRegistered => "DI REGISTERED",
            ShipmentStatus::CargoCleared => "CARGO CLEARED",
            ShipmentStatus::CargoDelivered => "CARGO DELIVERED",
        }
    }

    /// Case and spacing insensitive. `CARGO READY` is a legacy alias of
    /// `AT THE PORT`; any other value is unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match collapse(value).as_str() {
            "IN TRANSIT" => Some(ShipmentStatus::InTransit),
            "AT THE PORT" | "CARGO READY" => Some(ShipmentStatus::AtThePort),
            "DI REGISTERED" => Some(ShipmentStatus::DiRegistered),
            "CARGO CLEARED" => Some(ShipmentStatus::CargoCleared),
            "CARGO DELIVERED" => Some(ShipmentStatus::CargoDelivered),
            _ => None,
        }
    }
}

// ============================================================================
// Shipment mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentMode {
    Fcl,
    Lcl,
    FclLcl,
    Air,
    Road,
}

impl ShipmentMode {
    pub const ALL: [ShipmentMode; 5] = [
        ShipmentMode::Fcl,
        ShipmentMode::Lcl,
        ShipmentMode::FclLcl,
        ShipmentMode::Air,
        ShipmentMode::Road,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentMode::Fcl => "FCL",
            ShipmentMode::Lcl => "LCL",
            ShipmentMode::FclLcl => "FCL/LCL",
            ShipmentMode::Air => "AIR",
            ShipmentMode::Road => "ROAD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let v: String = collapse(value).chars().filter(|c| !c.is_whitespace()).collect();
        match v.as_str() {
            "FCL" => Some(ShipmentMode::Fcl),
            "LCL" => Some(ShipmentMode::Lcl),
            "FCL/LCL" | "FCL-LCL" => Some(ShipmentMode::FclLcl),
            "AIR" | "AEREO" | "AÉREO" => Some(ShipmentMode::Air),
            "ROAD" | "RODOVIARIO" | "RODOVIÁRIO" => Some(ShipmentMode::Road),
            _ => None,
        }
    }
}

// ============================================================================
// Incoterm
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Incoterm {
    Exw,
    Fca,
    Fas,
    Fob,
    Cfr,
    Cif,
    Cpt,
    Cip,
    Dap,
    Dpu,
    Ddp,
}

impl Incoterm {
    pub const ALL: [Incoterm; 11] = [
        Incoterm::Exw,
        Incoterm::Fca,
        Incoterm::Fas,
        Incoterm::Fob,
        Incoterm::Cfr,
        Incoterm::Cif,
        Incoterm::Cpt,
        Incoterm::Cip,
        Incoterm::Dap,
        Incoterm::Dpu,
        Incoterm::Ddp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Incoterm::Exw => "EXW",
            Incoterm::Fca => "FCA",
            Incoterm::Fas => "FAS",
            Incoterm::Fob => "FOB",
            Incoterm::Cfr => "CFR",
            Incoterm::Cif => "CIF",
            Incoterm::Cpt => "CPT",
            Incoterm::Cip => "CIP",
            Incoterm::Dap => "DAP",
            Incoterm::Dpu => "DPU",
            Incoterm::Ddp => "DDP",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let v = collapse(value);
        Self::ALL.iter().copied().find(|i| i.as_str() == v)
    }
}

// ============================================================================
// Parametrization channel
// ============================================================================

/// Customs parametrization channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Green,
    Yellow,
    Red,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Green, Channel::Yellow, Channel::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Green => "GREEN",
            Channel::Yellow => "YELLOW",
            Channel::Red => "RED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match collapse(value).as_str() {
            "GREEN" | "VERDE" => Some(Channel::Green),
            "YELLOW" | "AMARELO" => Some(Channel::Yellow),
            "RED" | "VERMELHO" => Some(Channel::Red),
            _ => None,
        }
    }
}

/// Uppercase, trimmed, inner whitespace collapsed to single spaces
fn collapse(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mode: &str, fcl: Option<u32>) -> ShipmentRecord {
        ShipmentRecord {
            id: "X".into(),
            bl_awb: "X".into(),
            mode: Some(mode.into()),
            fcl,
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_document_ref() {
        assert_eq!(sanitize_document_ref("MSCU/1234/56"), "MSCU-1234-56");
        assert_eq!(sanitize_document_ref(" 176-12345675 "), "176-12345675");
    }

    #[test]
    fn test_status_parse_with_alias() {
        assert_eq!(ShipmentStatus::parse("in  transit"), Some(ShipmentStatus::InTransit));
        assert_eq!(ShipmentStatus::parse("CARGO READY"), Some(ShipmentStatus::AtThePort));
        assert_eq!(ShipmentStatus::parse("ON HOLD"), None);
        assert_eq!(ShipmentStatus::parse(""), None);
    }

    #[test]
    fn test_lcl_never_contributes_containers() {
        assert_eq!(record("LCL", Some(7)).container_count(), 0);
        assert_eq!(record("AIR", Some(3)).container_count(), 0);
        assert_eq!(record("FCL", Some(3)).container_count(), 3);
        assert_eq!(record("fcl / lcl", Some(2)).container_count(), 2);
        assert_eq!(record("FCL", None).container_count(), 0);
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let first = ShipmentPatch {
            bl_awb: "MSCU/1".into(),
            status: Some("IN TRANSIT".into()),
            terminal: Some("Portonave".into()),
            ..Default::default()
        };
        let mut record = ShipmentRecord::from_patch(&first);
        assert_eq!(record.id, "MSCU-1");

        let second = ShipmentPatch {
            bl_awb: "MSCU/1".into(),
            status: Some("AT THE PORT".into()),
            ..Default::default()
        };
        record.merge(&second);
        assert_eq!(record.status.as_deref(), Some("AT THE PORT"));
        assert_eq!(record.terminal.as_deref(), Some("Portonave"));
    }

    #[test]
    fn test_channel_and_incoterm_parse() {
        assert_eq!(Channel::parse("Verde"), Some(Channel::Green));
        assert_eq!(Channel::parse("red"), Some(Channel::Red));
        assert_eq!(Channel::parse("blue"), None);
        assert_eq!(Incoterm::parse(" fob "), Some(Incoterm::Fob));
        assert_eq!(Incoterm::parse("FOBX"), None);
    }

    #[test]
    fn test_blank_date_is_absent() {
        let r = ShipmentRecord {
            eta: Some("  ".into()),
            etd: Some("2024-01-02".into()),
            ..Default::default()
        };
        assert_eq!(r.date(DateField::Eta), None);
        assert_eq!(r.date(DateField::Etd), Some("2024-01-02"));
    }

    #[test]
    fn test_patch_deserializes_with_absent_fields() {
        let patch: ShipmentPatch =
            serde_json::from_str(r#"{"bl_awb":"MEDU/7","fcl":2,"invoice_value":10.5}"#).unwrap();
        assert_eq!(patch.document_id(), "MEDU-7");
        assert_eq!(patch.fcl, Some(2));
        assert!(patch.status.is_none());
    }
}
