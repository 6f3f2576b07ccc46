use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use hazard_viewer::color::{blues_palette, DEEP_BLUE};
use hazard_viewer::data::chart::{line_segments, ChartPoint};
use hazard_viewer::state::AppState;

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Bar chart – first 10 rows
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(numeric) = &state.numeric_column else {
        return;
    };
    let id_col = &state.config.identifier_column;
    ui.heading(format!("📊 Bar Chart - {numeric} ({id_col} as X-axis)"));
    ui.label(format!("{numeric} Distribution (Top 10 by {id_col})"));

    let series = &state.bar_series;
    let colors = blues_palette(series.len());
    let bars: Vec<Bar> = series
        .iter()
        .zip(colors)
        .enumerate()
        .filter_map(|(i, (p, color))| {
            // Missing values leave an empty slot.
            p.value.map(|v| {
                Bar::new(i as f64, v)
                    .width(0.7)
                    .name(p.label.to_string())
                    .fill(color)
            })
        })
        .collect();

    let labels = axis_labels(series);
    Plot::new("bar_chart")
        .height(PLOT_HEIGHT)
        .x_axis_label(id_col.as_str())
        .y_axis_label(numeric.as_str())
        .x_axis_formatter(move |mark, range| label_for(&labels, mark, range))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(numeric.as_str()));
        });
    ui.add_space(12.0);
}

// ---------------------------------------------------------------------------
// Line chart – first 30 rows
// ---------------------------------------------------------------------------

pub fn line_chart(ui: &mut Ui, state: &AppState) {
    let Some(numeric) = &state.numeric_column else {
        return;
    };
    let id_col = &state.config.identifier_column;
    ui.heading(format!("📈 Line Chart - {numeric} ({id_col} as X-axis)"));
    ui.label(format!("{numeric} Trend (First 30 {id_col})"));

    let series = &state.line_series;
    let segments = line_segments(series);
    let labels = axis_labels(series);
    Plot::new("line_chart")
        .height(PLOT_HEIGHT)
        .x_axis_label(id_col.as_str())
        .y_axis_label(numeric.as_str())
        .x_axis_formatter(move |mark, range| label_for(&labels, mark, range))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for points in segments {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(numeric.as_str())
                        .color(DEEP_BLUE)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(numeric.as_str())
                        .color(DEEP_BLUE)
                        .radius(3.5),
                );
            }
        });
    ui.add_space(12.0);
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

fn axis_labels(series: &[ChartPoint]) -> Vec<String> {
    series.iter().map(|p| p.label.to_string()).collect()
}

/// Identifier label for integer grid marks that fall on a row position.
fn label_for(labels: &[String], mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let x = mark.value;
    if x.fract() != 0.0 || x < 0.0 {
        return String::new();
    }
    labels.get(x as usize).cloned().unwrap_or_default()
}
