//! Page state and the reducer that drives it.
//!
//! The UI holds one [`DashboardState`] and never mutates it directly: every
//! interaction is a [`DashboardAction`] folded in by [`reduce`].

use serde::{Deserialize, Serialize};

use super::filter::{MonthFilter, ShipmentFilter, YearFilter};
use crate::domain::a001_shipment::{DateField, ShipmentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Transit,
    Operation,
    Performance,
    Brokerage,
    Shipments,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Transit,
        Page::Operation,
        Page::Performance,
        Page::Brokerage,
        Page::Shipments,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Transit => "Trânsito",
            Page::Operation => "Operação",
            Page::Performance => "Performance",
            Page::Brokerage => "Despacho",
            Page::Shipments => "Embarques",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Transit => "/transit",
            Page::Operation => "/operation",
            Page::Performance => "/performance",
            Page::Brokerage => "/brokerage",
            Page::Shipments => "/shipments",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.path() == path)
    }

    /// Date the filter's year/month are applied to
    pub fn reference_field(&self) -> DateField {
        match self {
            Page::Transit | Page::Operation | Page::Shipments => DateField::Eta,
            Page::Performance | Page::Brokerage => DateField::DiRegistration,
        }
    }

    /// The raw table lists records that no time bucket can hold
    pub fn lists_undated(&self) -> bool {
        matches!(self, Page::Shipments)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Rows behind a clicked chart segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDown {
    pub title: String,
    pub records: Vec<ShipmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub page: Page,
    pub filter: ShipmentFilter,
    pub shipments: Vec<ShipmentRecord>,
    pub load: LoadState,
    pub drilldown: Option<DrillDown>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    Navigate(Page),
    ToggleCargoType(String),
    ClearCargoTypes,
    SetYear(YearFilter),
    SetMonth(MonthFilter),
    DataLoading,
    DataLoaded(Vec<ShipmentRecord>),
    /// Error text for the banner; loaded data stays as it was
    DataFailed(String),
    DrillDown { title: String, records: Vec<ShipmentRecord> },
    CloseDrillDown,
}

pub fn reduce(mut state: DashboardState, action: DashboardAction) -> DashboardState {
    match action {
        DashboardAction::Navigate(page) => {
            state.page = page;
            state.drilldown = None;
        }
        DashboardAction::ToggleCargoType(cargo_type) => state.filter.toggle_cargo_type(&cargo_type),
        DashboardAction::ClearCargoTypes => state.filter.cargo_types.clear(),
        DashboardAction::SetYear(year) => state.filter.year = year,
        DashboardAction::SetMonth(month) => state.filter.month = month,
        DashboardAction::DataLoading => state.load = LoadState::Loading,
        DashboardAction::DataLoaded(shipments) => {
            state.shipments = shipments;
            state.load = LoadState::Loaded;
            state.drilldown = None;
        }
        DashboardAction::DataFailed(message) => state.load = LoadState::Failed(message),
        DashboardAction::DrillDown { title, records } => {
            state.drilldown = Some(DrillDown { title, records })
        }
        DashboardAction::CloseDrillDown => state.drilldown = None,
    }
    state
}

impl DashboardState {
    /// Shipments passing the filter on the current page's reference date
    pub fn filtered(&self) -> Vec<&ShipmentRecord> {
        let field = self.page.reference_field();
        if self.page.lists_undated() {
            self.filter.apply_keeping_undated(&self.shipments, field)
        } else {
            self.filter.apply(&self.shipments, field)
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(id: &str, eta: &str) -> ShipmentRecord {
        ShipmentRecord {
            id: id.into(),
            bl_awb: id.into(),
            eta: Some(eta.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_failed_fetch_keeps_previous_data() {
        let state = reduce(
            DashboardState::default(),
            DashboardAction::DataLoaded(vec![shipment("A", "2024-01-01")]),
        );
        let state = reduce(state, DashboardAction::DataLoading);
        assert!(state.is_loading());
        let state = reduce(state, DashboardAction::DataFailed("Falha".into()));
        assert_eq!(state.shipments.len(), 1);
        assert_eq!(state.error(), Some("Falha"));
    }

    #[test]
    fn test_filter_actions() {
        let mut state = DashboardState::default();
        state = reduce(state, DashboardAction::SetYear(YearFilter::Year(2024)));
        state = reduce(state, DashboardAction::SetMonth(MonthFilter::Month(0)));
        state = reduce(state, DashboardAction::ToggleCargoType("Resina".into()));
        assert_eq!(state.filter.year, YearFilter::Year(2024));
        assert_eq!(state.filter.month, MonthFilter::Month(0));
        assert!(state.filter.cargo_types.contains("Resina"));
        state = reduce(state, DashboardAction::ClearCargoTypes);
        assert!(state.filter.cargo_types.is_empty());
    }

    #[test]
    fn test_navigation_closes_drilldown_and_switches_reference_date() {
        let mut state = reduce(
            DashboardState::default(),
            DashboardAction::DataLoaded(vec![shipment("A", "2024-01-01")]),
        );
        assert_eq!(state.filtered().len(), 1);

        state = reduce(
            state,
            DashboardAction::DrillDown {
                title: "IN TRANSIT".into(),
                records: vec![],
            },
        );
        assert!(state.drilldown.is_some());

        state = reduce(state, DashboardAction::Navigate(Page::Brokerage));
        assert!(state.drilldown.is_none());
        // no DI registration date on the record
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn test_reference_only_record_listed_on_shipments_page() {
        let bare = ShipmentRecord {
            id: "MSCU1234567".into(),
            bl_awb: "MSCU1234567".into(),
            ..Default::default()
        };
        let mut state = reduce(DashboardState::default(), DashboardAction::DataLoaded(vec![bare]));
        assert!(state.filtered().is_empty());

        state = reduce(state, DashboardAction::Navigate(Page::Shipments));
        assert_eq!(state.filtered().len(), 1);

        state = reduce(state, DashboardAction::SetYear(YearFilter::Year(2024)));
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn test_page_paths_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
        assert_eq!(Page::from_path("/nope"), None);
    }
}
