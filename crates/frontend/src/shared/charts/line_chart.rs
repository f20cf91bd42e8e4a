use contracts::dashboards::common::SeriesPoint;
use contracts::shared::charts::{line_points, nice_ticks, polyline_path, ZoomWindow};
use leptos::prelude::*;

use super::{format_value, num};

const PLOT_LEFT: f64 = 44.0;
const PLOT_TOP: f64 = 12.0;
const PLOT_WIDTH: f64 = 520.0;
const PLOT_HEIGHT: f64 = 200.0;

/// Points inside the zoom window. `None` only when the series itself is
/// empty; months without records stay in as zero points.
fn window_slice(points: &[SeriesPoint], window: ZoomWindow) -> Option<Vec<SeriesPoint>> {
    if points.is_empty() {
        return None;
    }
    let end = window.end.min(points.len());
    let start = window.start.min(end);
    Some(points[start..end].to_vec())
}

/// Monthly line with zoom and pan over the month index
#[component]
pub fn LineChart(
    title: &'static str,
    #[prop(into)] points: Signal<Vec<SeriesPoint>>,
    /// Suffix for point labels ("d", ...)
    #[prop(optional)]
    unit: &'static str,
    #[prop(default = "#2563eb")] color: &'static str,
) -> impl IntoView {
    let len = Memo::new(move |_| points.with(|p| p.len()));
    let zoom = RwSignal::new(ZoomWindow::full(len.get_untracked()));

    // A new series length invalidates the window
    Effect::new(move |_| {
        let n = len.get();
        if zoom.get_untracked().len != n {
            zoom.set(ZoomWindow::full(n));
        }
    });

    let visible = Memo::new(move |_| {
        let window = zoom.get();
        points.with(|p| window_slice(p, window))
    });

    view! {
        <div class="chart-card chart-card--wide">
            <div class="chart-card__header">
                <div class="chart-card__title">{title}</div>
                <div class="chart-card__zoom">
                    <button
                        class="chart-zoom__btn"
                        title="Mover para a esquerda"
                        disabled=move || zoom.get().start == 0
                        on:click=move |_| zoom.update(|z| *z = z.pan(-1))
                    >
                        "◀"
                    </button>
                    <button
                        class="chart-zoom__btn"
                        title="Aproximar"
                        on:click=move |_| zoom.update(|z| *z = z.zoom_in())
                    >
                        "+"
                    </button>
                    <button
                        class="chart-zoom__btn"
                        title="Afastar"
                        disabled=move || zoom.get().is_full()
                        on:click=move |_| zoom.update(|z| *z = z.zoom_out())
                    >
                        "−"
                    </button>
                    <button
                        class="chart-zoom__btn"
                        title="Mover para a direita"
                        disabled=move || { let z = zoom.get(); z.end >= z.len }
                        on:click=move |_| zoom.update(|z| *z = z.pan(1))
                    >
                        "▶"
                    </button>
                    <button
                        class="chart-zoom__btn"
                        title="Restaurar"
                        disabled=move || zoom.get().is_full()
                        on:click=move |_| zoom.update(|z| *z = z.reset())
                    >
                        "⟲"
                    </button>
                </div>
            </div>
            {move || {
                let Some(shown) = visible.get() else {
                    return view! { <div class="chart-card__empty">"Sem dados para o filtro"</div> }
                        .into_any();
                };
                let values: Vec<f64> = shown.iter().map(|p| p.value).collect();
                let ticks = nice_ticks(values.iter().copied().fold(0.0, f64::max), 4);
                let max = ticks.last().copied().unwrap_or(0.0);
                let coords = line_points(&values, PLOT_WIDTH, PLOT_HEIGHT, max);
                let scale = if max > 0.0 { PLOT_HEIGHT / max } else { 0.0 };
                let shifted: Vec<(f64, f64)> = coords
                    .iter()
                    .map(|(x, y)| (x + PLOT_LEFT, y + PLOT_TOP))
                    .collect();
                let grid = ticks
                    .iter()
                    .map(|t| {
                        let y = PLOT_TOP + PLOT_HEIGHT - t * scale;
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
                let markers = shifted
                    .iter()
                    .zip(&shown)
                    .map(|((x, y), point)| {
                        let label = if point.count == 0 {
                            String::new()
                        } else {
                            format!("{} {}", format_value(point.value, false), unit)
                        };
                        view! {
                            <circle cx=num(*x) cy=num(*y) r="3.5" fill=color class="chart-point" />
                            <text x=num(*x) y=num(y - 8.0) text-anchor="middle" class="chart-point__label">
                                {label.trim_end().to_string()}
                            </text>
                            <text
                                x=num(*x)
                                y=num(PLOT_TOP + PLOT_HEIGHT + 16.0)
                                text-anchor="middle"
                                class="chart-axis"
                            >
                                {point.short_label()}
                            </text>
                        }
                    })
                    .collect_view();
                view! {
                    <svg viewBox="0 0 600 240" class="line-chart">
                        {grid}
                        <path d=polyline_path(&shifted) fill="none" stroke=color stroke-width="2" />
                        {markers}
                    </svg>
                }
                    .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_point(month0: u32) -> SeriesPoint {
        SeriesPoint {
            month0,
            label: String::new(),
            value: 0.0,
            count: 0,
        }
    }

    #[test]
    fn test_all_zero_series_is_still_plotted() {
        let points: Vec<SeriesPoint> = (0..12).map(zero_point).collect();
        let shown = window_slice(&points, ZoomWindow::full(12)).unwrap();
        assert_eq!(shown.len(), 12);
        assert!(shown.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_window_over_empty_months_keeps_points() {
        let mut points: Vec<SeriesPoint> = (0..12).map(zero_point).collect();
        points[0].value = 4.0;
        points[0].count = 2;
        let window = ZoomWindow {
            start: 6,
            end: 12,
            len: 12,
        };
        let shown = window_slice(&points, window).unwrap();
        assert_eq!(shown.len(), 6);
        assert_eq!(shown[0].month0, 6);
    }

    #[test]
    fn test_empty_series_has_nothing_to_plot() {
        assert_eq!(window_slice(&[], ZoomWindow::full(0)), None);
    }
}
