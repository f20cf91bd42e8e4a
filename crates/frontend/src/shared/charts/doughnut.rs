use contracts::dashboards::common::{total_value, Bucket, Dimension};
use contracts::shared::charts::{color_for, doughnut_arcs, sector_path, Slice};
use leptos::prelude::*;

use super::format_value;

const CENTER: f64 = 100.0;
const OUTER_RADIUS: f64 = 90.0;
const INNER_RADIUS: f64 = 55.0;

/// Doughnut with a legend. Clicking a segment or a legend row hands the
/// bucket (and its records) to `on_select`.
#[component]
pub fn DoughnutChart(
    title: &'static str,
    dimension: Dimension,
    #[prop(into)] buckets: Signal<Vec<Bucket>>,
    /// Values are invoice amounts
    #[prop(optional)]
    money: bool,
    on_select: Callback<Bucket>,
) -> impl IntoView {
    let arcs = Memo::new(move |_| {
        buckets.with(|list| {
            let slices: Vec<Slice> = list.iter().map(|b| Slice::new(b.key.clone(), b.value)).collect();
            doughnut_arcs(&slices)
        })
    });
    let total = Memo::new(move |_| buckets.with(|list| total_value(list)));

    let select = move |key: String| {
        let bucket = buckets.with_untracked(|list| list.iter().find(|b| b.key == key).cloned());
        if let Some(bucket) = bucket {
            on_select.run(bucket);
        }
    };

    view! {
        <div class="chart-card">
            <div class="chart-card__title">{title}</div>
            {move || {
                if arcs.with(|a| a.is_empty()) {
                    return view! { <div class="chart-card__empty">"Sem dados para o filtro"</div> }
                        .into_any();
                }
                view! {
                    <div class="chart-card__body chart-card__body--doughnut">
                        <svg viewBox="0 0 200 200" class="doughnut">
                            {move || {
                                arcs.get()
                                    .into_iter()
                                    .map(|arc| {
                                        let key = arc.key.clone();
                                        let d = sector_path(
                                            CENTER,
                                            CENTER,
                                            OUTER_RADIUS,
                                            INNER_RADIUS,
                                            arc.start_deg,
                                            arc.end_deg,
                                        );
                                        view! {
                                            <path
                                                d=d
                                                fill=color_for(dimension, &arc.key)
                                                class="chart-segment"
                                                on:click=move |_| select(key.clone())
                                            />
                                        }
                                    })
                                    .collect_view()
                            }}
                            <text x="100" y="106" text-anchor="middle" class="doughnut__total">
                                {move || format_value(total.get(), money)}
                            </text>
                        </svg>
                        <ul class="chart-legend">
                            {move || {
                                arcs.get()
                                    .into_iter()
                                    .map(|arc| {
                                        let key = arc.key.clone();
                                        let label = format!(
                                            "{}: {} ({:.1}%)",
                                            arc.key,
                                            format_value(arc.value, money),
                                            arc.share * 100.0,
                                        );
                                        view! {
                                            <li class="chart-legend__item" on:click=move |_| select(key.clone())>
                                                <span
                                                    class="chart-legend__swatch"
                                                    style=format!("background:{}", color_for(dimension, &arc.key))
                                                ></span>
                                                {label}
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}
