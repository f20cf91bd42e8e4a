use contracts::dashboards::common::TerminalSeries;
use contracts::shared::charts::{stacked_bars, terminal_color, StackSeries};
use leptos::prelude::*;

use super::{format_value, num};

const PLOT_LEFT: f64 = 44.0;
const PLOT_TOP: f64 = 10.0;
const PLOT_WIDTH: f64 = 540.0;
const PLOT_HEIGHT: f64 = 220.0;
const BAR_FILL: f64 = 0.6;

/// Month labels and per-terminal stacks for the geometry helper
fn to_stacks(series: &[TerminalSeries]) -> (Vec<String>, Vec<StackSeries>) {
    let labels = series
        .first()
        .map(|s| s.points.iter().map(|p| p.short_label().to_string()).collect())
        .unwrap_or_default();
    let stacks = series
        .iter()
        .map(|s| StackSeries {
            key: s.terminal.clone(),
            values: s.points.iter().map(|p| p.value).collect(),
        })
        .collect();
    (labels, stacks)
}

/// Containers per month stacked by terminal
#[component]
pub fn StackedBarChart(
    title: &'static str,
    #[prop(into)] series: Signal<Vec<TerminalSeries>>,
) -> impl IntoView {
    let bars = Memo::new(move |_| {
        series.with(|s| {
            let (labels, stacks) = to_stacks(s);
            stacked_bars(&labels, &stacks, PLOT_HEIGHT)
        })
    });
    let legend = Memo::new(move |_| {
        bars.with(|b| {
            let mut keys: Vec<String> = Vec::new();
            for segment in b.columns.iter().flat_map(|c| &c.segments) {
                if !keys.contains(&segment.key) {
                    keys.push(segment.key.clone());
                }
            }
            keys
        })
    });

    view! {
        <div class="chart-card chart-card--wide">
            <div class="chart-card__title">{title}</div>
            {move || {
                let b = bars.get();
                if b.max_total <= 0.0 {
                    return view! { <div class="chart-card__empty">"Sem dados para o filtro"</div> }
                        .into_any();
                }
                let slot = PLOT_WIDTH / b.columns.len().max(1) as f64;
                let bar_width = slot * BAR_FILL;
                let ticks = b
                    .ticks
                    .iter()
                    .map(|t| {
                        let y = PLOT_TOP + PLOT_HEIGHT - t * b.scale;
                        view! {
                            <line
                                x1=num(PLOT_LEFT)
                                x2=num(PLOT_LEFT + PLOT_WIDTH)
                                y1=num(y)
                                y2=num(y)
                                class="chart-gridline"
                            />
                            <text x=num(PLOT_LEFT - 6.0) y=num(y + 4.0) text-anchor="end" class="chart-axis">
                                {format_value(*t, false)}
                            </text>
                        }
                    })
                    .collect_view();
                let columns = b
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        let x = PLOT_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
                        let segments = column
                            .segments
                            .iter()
                            .map(|s| {
                                view! {
                                    <rect
                                        x=num(x)
                                        y=num(PLOT_TOP + s.y)
                                        width=num(bar_width)
                                        height=num(s.height)
                                        fill=terminal_color(&s.key)
                                        class="chart-segment"
                                    />
                                }
                            })
                            .collect_view();
                        view! {
                            <g>
                                {segments}
                                <text
                                    x=num(x + bar_width / 2.0)
                                    y=num(PLOT_TOP + PLOT_HEIGHT + 16.0)
                                    text-anchor="middle"
                                    class="chart-axis"
                                >
                                    {column.label.clone()}
                                </text>
                            </g>
                        }
                    })
                    .collect_view();
                view! {
                    <svg viewBox="0 0 600 260" class="stacked-bars">
                        {ticks}
                        {columns}
                    </svg>
                    <ul class="chart-legend chart-legend--inline">
                        {legend
                            .get()
                            .into_iter()
                            .map(|key| {
                                view! {
                                    <li class="chart-legend__item">
                                        <span
                                            class="chart-legend__swatch"
                                            style=format!("background:{}", terminal_color(&key))
                                        ></span>
                                        {key}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::common::SeriesPoint;

    fn point(month0: u32, label: &str, value: f64) -> SeriesPoint {
        SeriesPoint {
            month0,
            label: label.to_string(),
            value,
            count: 0,
        }
    }

    #[test]
    fn test_to_stacks_takes_labels_from_first_series() {
        let series = vec![
            TerminalSeries {
                terminal: "PORTONAVE".into(),
                points: vec![point(0, "Janeiro", 2.0), point(1, "Fevereiro", 0.0)],
            },
            TerminalSeries {
                terminal: "ITAPOA".into(),
                points: vec![point(0, "Janeiro", 1.0), point(1, "Fevereiro", 3.0)],
            },
        ];
        let (labels, stacks) = to_stacks(&series);
        assert_eq!(labels, vec!["Jan".to_string(), "Fev".to_string()]);
        assert_eq!(stacks[1].values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_to_stacks_empty() {
        let (labels, stacks) = to_stacks(&[]);
        assert!(labels.is_empty());
        assert!(stacks.is_empty());
    }
}
