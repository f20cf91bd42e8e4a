use contracts::dashboards::common::Dimension;
use contracts::dashboards::d401_operation::OperationView;
use leptos::prelude::*;

use crate::dashboards::common::{drilldown_callback, DashboardHeader, LoadErrorBanner};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::charts::{DoughnutChart, StackedBarChart};
use crate::shared::components::FilterPanel;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[component]
pub fn OperationPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let data = Memo::new(move |_| ctx.state.with(|s| OperationView::build(&s.filtered())));

    view! {
        <PageFrame page_id="d401_operation--dashboard" category=PAGE_CAT_DASHBOARD>
            <DashboardHeader title="Operação" />
            <FilterPanel />
            <LoadErrorBanner />
            <StackedBarChart
                title="Contêineres por mês e terminal (ETA)"
                series=Signal::derive(move || data.with(|v| v.monthly_containers.clone()))
            />
            <div class="chart-grid">
                <DoughnutChart
                    title="Embarques por terminal"
                    dimension=Dimension::Terminal
                    buckets=Signal::derive(move || data.with(|v| v.by_terminal.clone()))
                    on_select=drilldown_callback(ctx, "Terminal")
                />
                <DoughnutChart
                    title="Embarques por Incoterm"
                    dimension=Dimension::Incoterm
                    buckets=Signal::derive(move || data.with(|v| v.by_incoterm.clone()))
                    on_select=drilldown_callback(ctx, "Incoterm")
                />
                <DoughnutChart
                    title="Contêineres por modal"
                    dimension=Dimension::Mode
                    buckets=Signal::derive(move || data.with(|v| v.containers_by_mode.clone()))
                    on_select=drilldown_callback(ctx, "Modal")
                />
            </div>
        </PageFrame>
    }
}
