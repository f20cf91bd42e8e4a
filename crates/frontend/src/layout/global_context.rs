use contracts::dashboards::common::{reduce, DashboardAction, DashboardState, Page};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::window;

use crate::domain::a001_shipment::api;

/// Banner text for a failed fetch; details go to the console
pub const LOAD_ERROR_MESSAGE: &str = "Não foi possível carregar os embarques.";

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub state: RwSignal<DashboardState>,
    pub left_open: RwSignal<bool>,
    pub upload_open: RwSignal<bool>,
}

fn page_from_location() -> Option<Page> {
    let hash = window()?.location().hash().ok()?;
    Page::from_path(hash.trim_start_matches('#'))
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(DashboardState::default()),
            left_open: RwSignal::new(true),
            upload_open: RwSignal::new(false),
        }
    }

    /// Fold an action into the page state
    pub fn dispatch(&self, action: DashboardAction) {
        self.state.update(|state| {
            let current = std::mem::take(state);
            *state = reduce(current, action);
        });
    }

    pub fn navigate(&self, page: Page) {
        self.dispatch(DashboardAction::Navigate(page));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// One-shot fetch of the whole collection. A failure keeps whatever was
    /// loaded before and raises the banner.
    pub fn reload(&self, access_token: String) {
        let this = *self;
        this.dispatch(DashboardAction::DataLoading);
        spawn_local(async move {
            match api::fetch_all(&access_token).await {
                Ok(shipments) => {
                    log::info!("Loaded {} shipments", shipments.len());
                    this.dispatch(DashboardAction::DataLoaded(shipments));
                }
                Err(e) => {
                    log::error!("Failed to load shipments: {}", e);
                    this.dispatch(DashboardAction::DataFailed(LOAD_ERROR_MESSAGE.to_string()));
                }
            }
        });
    }

    /// Keeps the current page and the URL hash (`#/transit`, ...) in sync
    pub fn init_router_integration(&self) {
        if let Some(page) = page_from_location() {
            self.navigate(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let path = this.state.with(|s| s.page.path());
            let new_hash = format!("#{}", path);
            let Some(w) = window() else {
                return;
            };
            let current_hash = w.location().hash().unwrap_or_default();
            if current_hash != new_hash {
                if let Ok(history) = w.history() {
                    let _ = history.push_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_hash),
                    );
                }
            }
        });

        let _ = window_event_listener(leptos::ev::hashchange, move |_| {
            if let Some(page) = page_from_location() {
                if this.state.with_untracked(|s| s.page) != page {
                    this.navigate(page);
                }
            }
        });
        let _ = window_event_listener(leptos::ev::popstate, move |_| {
            if let Some(page) = page_from_location() {
                if this.state.with_untracked(|s| s.page) != page {
                    this.navigate(page);
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
