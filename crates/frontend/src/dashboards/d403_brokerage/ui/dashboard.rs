use contracts::dashboards::common::Dimension;
use contracts::dashboards::d403_brokerage::BrokerageView;
use leptos::prelude::*;

use crate::dashboards::common::{drilldown_callback, DashboardHeader, LoadErrorBanner};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::charts::{DoughnutChart, LineChart};
use crate::shared::components::FilterPanel;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[component]
pub fn BrokeragePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let data = Memo::new(move |_| ctx.state.with(|s| BrokerageView::build(&s.filtered())));

    view! {
        <PageFrame page_id="d403_brokerage--dashboard" category=PAGE_CAT_DASHBOARD>
            <DashboardHeader title="Despacho" />
            <FilterPanel />
            <LoadErrorBanner />
            <div class="chart-grid">
                <DoughnutChart
                    title="DIs por canal"
                    dimension=Dimension::Channel
                    buckets=Signal::derive(move || data.with(|v| v.di_by_channel.clone()))
                    on_select=drilldown_callback(ctx, "Canal")
                />
                <DoughnutChart
                    title="Valor da fatura por Incoterm (USD)"
                    dimension=Dimension::Incoterm
                    buckets=Signal::derive(move || data.with(|v| v.invoice_by_incoterm.clone()))
                    money=true
                    on_select=drilldown_callback(ctx, "Incoterm")
                />
            </div>
            <LineChart
                title="DIs registradas por mês"
                points=Signal::derive(move || data.with(|v| v.monthly_registrations.clone()))
            />
        </PageFrame>
    }
}
