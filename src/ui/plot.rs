use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};
use titanic_insights::chart::{ChartKind, ChartSpec, Point};

use super::color32;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the active view's chart in the central panel.
pub fn chart(ui: &mut Ui, state: &AppState) {
    let chart = match state.active_chart() {
        Some(Ok(chart)) => chart,
        Some(Err(e)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!("Cannot chart this dataset: {e}"));
            });
            return;
        }
        None => return,
    };

    ui.heading(&chart.title);
    match chart.kind {
        ChartKind::GroupedBar => grouped_bars(ui, state, chart),
        ChartKind::Scatter => scatter(ui, state, chart),
    }
}

fn detail_text(point: &Point) -> String {
    point
        .detail
        .iter()
        .map(|d| format!("{}: {}", d.field, d.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One plot per facet, bars of each series side by side.
fn grouped_bars(ui: &mut Ui, state: &AppState, chart: &ChartSpec) {
    let facets: Vec<Option<&str>> = chart
        .facets()
        .into_iter()
        .filter(|f| f.map_or(true, |label| state.label_visible(label)))
        .collect();
    if facets.is_empty() {
        ui.label("No class selected.");
        return;
    }

    let facet_field = chart.facet_field.as_deref().unwrap_or_default();
    let categories = chart.x.categories.clone().unwrap_or_default();
    let outline = chart
        .outline
        .map(|o| Stroke::new(o.width, color32(o.color)))
        .unwrap_or(Stroke::NONE);

    ui.columns(facets.len(), |columns| {
        for (ui, facet) in columns.iter_mut().zip(&facets) {
            if let Some(label) = facet {
                ui.strong(format!("{facet_field} = {label}"));
            }

            let series: Vec<_> = chart.series_in(*facet).collect();
            let group_width = 0.8;
            let bar_width = group_width / series.len().max(1) as f64;
            let categories = categories.clone();

            Plot::new(("grouped_bars", facet.unwrap_or_default()))
                .legend(Legend::default())
                .x_axis_label(&chart.x.label)
                .y_axis_label(&chart.y.label)
                .include_y(0.0)
                .include_y(1.0)
                .x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                        return String::new();
                    }
                    categories.get(idx as usize).cloned().unwrap_or_default()
                })
                .show(ui, |plot_ui| {
                    for (k, s) in series.iter().enumerate() {
                        let offset = (k as f64 - (series.len() as f64 - 1.0) / 2.0) * bar_width;
                        let bars = s
                            .points
                            .iter()
                            .map(|p| {
                                let stroke = if p.highlight {
                                    Stroke::new(outline.width * 2.0, outline.color)
                                } else {
                                    outline
                                };
                                let category = chart.x.category_at(p.x).unwrap_or_default();
                                Bar::new(p.x + offset, p.y)
                                    .width(bar_width)
                                    .name(format!("{} · {category}\n{}", s.name, detail_text(p)))
                                    .fill(color32(s.color))
                                    .stroke(stroke)
                            })
                            .collect();
                        let bar_chart = BarChart::new(bars)
                            .name(&s.name)
                            .color(color32(s.color))
                            .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                                format!("{}\nsurvival rate: {:.2}", bar.name, bar.value)
                            }));
                        plot_ui.bar_chart(bar_chart);
                    }
                });
        }
    });
}

/// Single scatter plot; point radius grows with the size key.
fn scatter(ui: &mut Ui, state: &AppState, chart: &ChartSpec) {
    let max_size = chart.max_size().unwrap_or(1.0).max(1.0);
    let radius = |size: Option<f64>| -> f32 {
        let share = size.unwrap_or(0.0) / max_size;
        (3.0 + 12.0 * share.sqrt()) as f32
    };

    let visible: Vec<_> = chart
        .series
        .iter()
        .filter(|s| state.label_visible(&s.name))
        .collect();

    // (series, x, y) → hover text
    let hover: Vec<(String, f64, f64, String)> = visible
        .iter()
        .flat_map(|s| {
            let size_field = chart.size_field.clone().unwrap_or_default();
            s.points.iter().map(move |p| {
                let size = p.size.map(|v| format!("\n{size_field}: {v}")).unwrap_or_default();
                (s.name.clone(), p.x, p.y, format!("{size}\n{}", detail_text(p)))
            })
        })
        .collect();
    let color_field = chart.colors.field.clone();
    let (x_label, y_label) = (chart.x.label.clone(), chart.y.label.clone());

    Plot::new("scatter")
        .legend(Legend::default())
        .x_axis_label(&chart.x.label)
        .y_axis_label(&chart.y.label)
        .include_x(0.0)
        .include_y(0.0)
        .label_formatter(move |name, value| {
            let extra = hover
                .iter()
                .find(|(n, x, y, _)| {
                    n == name && (x - value.x).abs() < 1e-9 && (y - value.y).abs() < 1e-9
                })
                .map(|(_, _, _, text)| text.as_str())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{x_label}: {:.0}\n{y_label}: {:.2}", value.x, value.y)
            } else {
                format!(
                    "{color_field} = {name}\n{x_label}: {:.0}\n{y_label}: {:.2}{extra}",
                    value.x, value.y
                )
            }
        })
        .show(ui, |plot_ui| {
            for s in &visible {
                for p in &s.points {
                    plot_ui.points(
                        Points::new(vec![[p.x, p.y]])
                            .name(&s.name)
                            .color(color32(s.color))
                            .radius(radius(p.size))
                            .filled(true),
                    );
                }
            }
        });
}
