use contracts::dashboards::common::Dimension;
use contracts::dashboards::d400_transit::TransitView;
use contracts::domain::a001_shipment::ShipmentStatus;
use leptos::prelude::*;

use crate::dashboards::common::{drilldown_callback, DashboardHeader, LoadErrorBanner};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::charts::DoughnutChart;
use crate::shared::components::stat_card::{format_days, format_thousands};
use crate::shared::components::{FilterPanel, StatCard};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[component]
pub fn TransitPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let data = Memo::new(move |_| ctx.state.with(|s| TransitView::build(&s.filtered())));

    let shipments = Signal::derive(move || {
        format_thousands(data.with(|v| v.kpis.total_shipments) as i64)
    });
    let containers = Signal::derive(move || format_thousands(data.with(|v| v.kpis.containers) as i64));
    let distinct_di = Signal::derive(move || format_thousands(data.with(|v| v.kpis.distinct_di) as i64));
    let clearance = Signal::derive(move || format_days(data.with(|v| v.kpis.mean_clearance_days)));
    let in_transit = Signal::derive(move || {
        data.with(|v| {
            v.kpis
                .by_status
                .iter()
                .find(|(status, _)| status == ShipmentStatus::InTransit.as_str())
                .map(|(_, n)| format!("{} em trânsito", n))
        })
    });

    view! {
        <PageFrame page_id="d400_transit--dashboard" category=PAGE_CAT_DASHBOARD>
            <DashboardHeader title="Trânsito" />
            <FilterPanel />
            <LoadErrorBanner />
            <div class="stat-grid">
                <StatCard label="Embarques" icon_name="ship" value=shipments subtitle=in_transit />
                <StatCard label="Contêineres" icon_name="box" value=containers />
                <StatCard label="DIs distintas" icon_name="hash" value=distinct_di />
                <StatCard label="Média registro → desembaraço" icon_name="clock" value=clearance />
            </div>
            <div class="chart-grid">
                <DoughnutChart
                    title="Embarques por status"
                    dimension=Dimension::Status
                    buckets=Signal::derive(move || data.with(|v| v.by_status.clone()))
                    on_select=drilldown_callback(ctx, "Status")
                />
                <DoughnutChart
                    title="Contêineres por terminal"
                    dimension=Dimension::Terminal
                    buckets=Signal::derive(move || data.with(|v| v.containers_by_terminal.clone()))
                    on_select=drilldown_callback(ctx, "Terminal")
                />
                <DoughnutChart
                    title="Embarques por modal"
                    dimension=Dimension::Mode
                    buckets=Signal::derive(move || data.with(|v| v.by_mode.clone()))
                    on_select=drilldown_callback(ctx, "Modal")
                />
            </div>
        </PageFrame>
    }
}
