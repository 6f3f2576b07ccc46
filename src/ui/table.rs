use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use hazard_viewer::data::model::{CellValue, Dataset};
use hazard_viewer::data::summary::STAT_LABELS;
use hazard_viewer::state::AppState;

use super::panels::save_file_dialog;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

pub fn preview_section(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    ui.heading("🔬 Data Preview");
    ui.push_id("preview_table", |ui: &mut Ui| data_table(ui, ds));
    ui.add_space(12.0);
}

/// `describe()`-style grid: one row per statistic, one column per numeric column.
pub fn statistics_section(ui: &mut Ui, state: &AppState) {
    ui.heading("📈 Data Statistics");
    if state.summary.is_empty() {
        ui.label("No numeric columns to summarise.");
        ui.add_space(12.0);
        return;
    }

    ui.push_id("stats_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(50.0))
            .columns(Column::auto().at_least(80.0), state.summary.columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header.col(|_ui| {});
                for s in &state.summary.columns {
                    header.col(|ui| {
                        ui.strong(&s.column);
                    });
                }
            })
            .body(|mut body| {
                for (i, label) in STAT_LABELS.iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.strong(*label);
                        });
                        for s in &state.summary.columns {
                            row.col(|ui| {
                                ui.label(format_stat(s.values()[i]));
                            });
                        }
                    });
                }
            });
    });
    ui.add_space(12.0);
}

/// Filtered rows plus the download button.
pub fn filtered_section(ui: &mut Ui, state: &mut AppState) {
    let column = state.filter_column.clone().unwrap_or_default();
    let value = state
        .filter_value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
    ui.heading(format!("Filtered Data - {column}: {value}"));
    ui.label(format!("{} matching rows", state.filtered.len()));
    ui.push_id("filtered_table", |ui: &mut Ui| data_table(ui, &state.filtered));

    ui.add_space(6.0);
    if ui
        .button(RichText::new("📥 Download Filtered Data (CSV)").strong())
        .clicked()
    {
        save_file_dialog(state);
    }
    ui.add_space(12.0);
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Row-virtualised table of a dataset with a leading row index.
fn data_table(ui: &mut Ui, ds: &Dataset) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(TABLE_HEIGHT)
        .column(Column::auto().at_least(40.0))
        .columns(Column::initial(120.0).at_least(40.0).clip(true), ds.columns.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            header.col(|_ui| {});
            for name in &ds.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, ds.len(), |mut row| {
                let idx = row.index();
                row.col(|ui| {
                    ui.label(RichText::new(idx.to_string()).weak());
                });
                for cell in &ds.rows[idx].values {
                    row.col(|ui| {
                        ui.add(egui::Label::new(cell_text(cell)).truncate());
                    });
                }
            });
        });
}

fn cell_text(cell: &CellValue) -> RichText {
    match cell {
        CellValue::Missing => RichText::new("None").weak().italics(),
        CellValue::Number(v) => RichText::new(format_number(*v)).monospace(),
        CellValue::Text(s) => RichText::new(s),
    }
}

fn format_stat(v: Option<f64>) -> String {
    v.map(format_number).unwrap_or_else(|| "NaN".to_string())
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else if v.abs() >= 1e6 || (v != 0.0 && v.abs() < 1e-4) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}
