use contracts::dashboards::common::DashboardAction;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_shipment::ui::ShipmentTable;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;

/// Records behind the last clicked chart segment
#[component]
pub fn DrillDownPanel() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let close = Callback::new(move |_: ()| ctx.dispatch(DashboardAction::CloseDrillDown));

    let title = Signal::derive(move || {
        ctx.state
            .with(|s| s.drilldown.as_ref().map(|d| d.title.clone()))
            .unwrap_or_default()
    });
    let records = Signal::derive(move || {
        ctx.state
            .with(|s| s.drilldown.as_ref().map(|d| d.records.clone()))
            .unwrap_or_default()
    });

    view! {
        <ModalFrame on_close=close modal_class="drilldown-modal">
            <div class="modal-header">
                <h3 class="modal-title">
                    {move || title.get()}
                    <span class="modal-title__count">
                        {move || format!(" ({})", records.with(|r| r.len()))}
                    </span>
                </h3>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| close.run(())>
                    {icon("x")}
                </Button>
            </div>
            <div class="modal-body">
                <ShipmentTable records=records />
            </div>
        </ModalFrame>
    }
}
