pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;

use global_context::AppGlobalContext;
use top_header::TopHeader;

/// Top bar over a collapsible sidebar and the page area
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let collapsed = move || !ctx.left_open.get();

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body" class:app-body--collapsed=collapsed>
                <aside data-zone="left" class="app-sidebar" class:hidden=collapsed>
                    {left()}
                </aside>
                <main class="app-main">{center()}</main>
            </div>
        </div>
    }
}
