//! Page navigation

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::dashboards::common::Page;
use leptos::prelude::*;

fn page_icon(page: Page) -> &'static str {
    match page {
        Page::Transit => "ship",
        Page::Operation => "layers",
        Page::Performance => "clock",
        Page::Brokerage => "file-text",
        Page::Shipments => "table",
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <nav class="app-sidebar__content">
            {Page::ALL
                .into_iter()
                .map(|page| {
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.state.with(|s| s.page == page)
                            on:click=move |_| ctx.navigate(page)
                        >
                            {icon(page_icon(page))}
                            <span class="app-sidebar__label">{page.title()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </nav>
    }
}
