use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::dashboards::common::{DashboardAction, MonthFilter, ShipmentFilter, YearFilter};
use contracts::shared::date_utils::MONTH_LABELS;
use leptos::prelude::*;

fn year_value(year: YearFilter) -> String {
    match year {
        YearFilter::All => "all".to_string(),
        YearFilter::Year(y) => y.to_string(),
    }
}

fn month_value(month: MonthFilter) -> String {
    match month {
        MonthFilter::All => "all".to_string(),
        MonthFilter::Month(m) => m.to_string(),
    }
}

/// Collapsible filter bar: cargo-type chips, year and month of the page's
/// reference date.
#[component]
pub fn FilterPanel() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_expanded = RwSignal::new(true);

    let filter = Memo::new(move |_| ctx.state.with(|s| s.filter.clone()));
    let years = Memo::new(move |_| {
        ctx.state
            .with(|s| ShipmentFilter::available_years(&s.shipments, s.page.reference_field()))
    });
    let cargo_types =
        Memo::new(move |_| ctx.state.with(|s| ShipmentFilter::available_cargo_types(&s.shipments)));

    let active_filters_count = move || {
        filter.with(|f| {
            f.cargo_types.len()
                + usize::from(f.year != YearFilter::All)
                + usize::from(f.month != MonthFilter::All)
        })
    };

    let on_year = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let year = value.parse::<i32>().map(YearFilter::Year).unwrap_or(YearFilter::All);
        ctx.dispatch(DashboardAction::SetYear(year));
    };

    let on_month = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let month = value
            .parse::<u32>()
            .ok()
            .filter(|m| *m < 12)
            .map(MonthFilter::Month)
            .unwrap_or(MonthFilter::All);
        ctx.dispatch(DashboardAction::SetMonth(month));
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=move |_| is_expanded.update(|e| *e = !*e)
                >
                    {icon("filter")}
                    <span class="filter-panel__title">"Filtros"</span>
                    {move || {
                        let count = active_filters_count();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
                <div class="filter-panel-header__right">
                    <button
                        class="button button--secondary"
                        on:click=move |_| {
                            ctx.dispatch(DashboardAction::ClearCargoTypes);
                            ctx.dispatch(DashboardAction::SetYear(YearFilter::All));
                            ctx.dispatch(DashboardAction::SetMonth(MonthFilter::All));
                        }
                    >
                        "Limpar"
                    </button>
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    <label class="filter-panel__field">
                        "Ano"
                        <select
                            on:change=on_year
                            prop:value=move || filter.with(|f| year_value(f.year))
                        >
                            <option value="all">"Todos"</option>
                            {move || years.get().into_iter().map(|y| {
                                view! { <option value=y.to_string()>{y}</option> }
                            }).collect_view()}
                        </select>
                    </label>

                    <label class="filter-panel__field">
                        "Mês"
                        <select
                            on:change=on_month
                            prop:value=move || filter.with(|f| month_value(f.month))
                        >
                            <option value="all">"Todos"</option>
                            {MONTH_LABELS.iter().enumerate().map(|(i, label)| {
                                view! { <option value=i.to_string()>{*label}</option> }
                            }).collect_view()}
                        </select>
                    </label>

                    <div class="filter-panel__chips">
                        {move || cargo_types.get().into_iter().map(|cargo_type| {
                            let key = cargo_type.clone();
                            let selected = {
                                let key = key.clone();
                                move || filter.with(|f| f.cargo_types.contains(&key))
                            };
                            view! {
                                <button
                                    class="filter-tag"
                                    class:filter-tag--selected=selected
                                    on:click=move |_| ctx.dispatch(DashboardAction::ToggleCargoType(key.clone()))
                                >
                                    {cargo_type}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
