//! Application shell: auth gate plus the main layout

use crate::dashboards::common::drilldown::DrillDownPanel;
use crate::dashboards::d400_transit::TransitPage;
use crate::dashboards::d401_operation::OperationPage;
use crate::dashboards::d402_performance::PerformancePage;
use crate::dashboards::d403_brokerage::BrokeragePage;
use crate::domain::a001_shipment::ui::ShipmentsPage;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::shared::excel_importer::ShipmentUploadModal;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use crate::system::profile;
use contracts::dashboards::common::Page;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn CurrentPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let page = Memo::new(move |_| ctx.state.with(|s| s.page));

    move || match page.get() {
        Page::Transit => view! { <TransitPage /> }.into_any(),
        Page::Operation => view! { <OperationPage /> }.into_any(),
        Page::Performance => view! { <PerformancePage /> }.into_any(),
        Page::Brokerage => view! { <BrokeragePage /> }.into_any(),
        Page::Shipments => view! { <ShipmentsPage /> }.into_any(),
    }
}

/// Sidebar, top bar and the current page. Loads the collection and the
/// profile once on mount.
#[component]
fn MainLayout() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_router_integration();

    let (auth_state, set_auth_state) = use_auth();
    if let Some(token) = auth_state.with_untracked(|s| s.access_token.clone()) {
        ctx.reload(token.clone());
        spawn_local(async move {
            match profile::get_my_profile(&token).await {
                Ok(p) => set_auth_state.update(|s| s.profile = Some(p)),
                Err(e) => log::warn!("Profile not loaded: {}", e),
            }
        });
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <CurrentPage /> }.into_any()
        />
        <Show when=move || ctx.state.with(|s| s.drilldown.is_some())>
            <DrillDownPanel />
        </Show>
        <Show when=move || ctx.upload_open.get()>
            <ShipmentUploadModal />
        </Show>
    }
}

/// Shows `LoginPage` until a session exists, `MainLayout` afterwards
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=move || {
                if auth_state.with(|s| s.restoring) {
                    view! { <div class="loading">"Verificando sessão..."</div> }.into_any()
                } else {
                    view! { <LoginPage /> }.into_any()
                }
            }
        >
            <MainLayout />
        </Show>
    }
}
