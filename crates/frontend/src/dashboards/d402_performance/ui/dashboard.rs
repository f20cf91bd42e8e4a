use contracts::dashboards::d402_performance::PerformanceView;
use leptos::prelude::*;

use crate::dashboards::common::{DashboardHeader, LoadErrorBanner};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::charts::LineChart;
use crate::shared::components::stat_card::{format_days, format_thousands};
use crate::shared::components::{FilterPanel, StatCard};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

#[component]
pub fn PerformancePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let data = Memo::new(move |_| ctx.state.with(|s| PerformanceView::build(&s.filtered())));

    let clearance = Signal::derive(move || format_days(data.with(|v| v.kpis.mean_clearance_days)));
    let distinct_di = Signal::derive(move || format_thousands(data.with(|v| v.kpis.distinct_di) as i64));

    view! {
        <PageFrame page_id="d402_performance--dashboard" category=PAGE_CAT_DASHBOARD>
            <DashboardHeader title="Performance" />
            <FilterPanel />
            <LoadErrorBanner />
            <div class="stat-grid">
                <StatCard label="Média registro → desembaraço" icon_name="clock" value=clearance />
                <StatCard label="DIs registradas" icon_name="hash" value=distinct_di />
            </div>
            <LineChart
                title="Dias entre registro da DI e desembaraço"
                points=Signal::derive(move || data.with(|v| v.clearance_days.clone()))
                unit="d"
            />
            <LineChart
                title="Dias entre presença de carga e registro da DI"
                points=Signal::derive(move || data.with(|v| v.registration_days.clone()))
                unit="d"
                color="#059669"
            />
            <LineChart
                title="Dias entre desembaraço e entrega (jul-dez)"
                points=Signal::derive(move || data.with(|v| v.delivery_days.clone()))
                unit="d"
                color="#d97706"
            />
        </PageFrame>
    }
}
