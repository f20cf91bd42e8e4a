pub mod drilldown;

use contracts::dashboards::common::{Bucket, DashboardAction};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

/// Chart click handler that opens the rows behind a bucket
pub fn drilldown_callback(ctx: AppGlobalContext, chart_title: &'static str) -> Callback<Bucket> {
    Callback::new(move |bucket: Bucket| {
        ctx.dispatch(DashboardAction::DrillDown {
            title: format!("{}: {}", chart_title, bucket.key),
            records: bucket.records,
        });
    })
}

/// Red banner shown while the last fetch failed
#[component]
pub fn LoadErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    move || {
        ctx.state.with(|s| {
            s.error().map(|message| {
                view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{message.to_string()}</span>
                    </div>
                }
            })
        })
    }
}

/// Page title with a loading hint
#[component]
pub fn DashboardHeader(title: &'static str) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    view! {
        <div class="page__header">
            <h2 class="page__title">{title}</h2>
            <Show when=move || ctx.state.with(|s| s.is_loading())>
                <span class="page__loading">"Atualizando..."</span>
            </Show>
        </div>
    }
}
