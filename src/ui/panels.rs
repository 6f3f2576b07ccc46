use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use hazard_viewer::color::{BANNER_FILL, DEEP_BLUE};
use hazard_viewer::config::AppConfig;
use hazard_viewer::data::export::EXPORT_FILE_NAME;
use hazard_viewer::data::filter::search_values;
use hazard_viewer::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter and chart selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Data Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Filter column ----
    ui.strong("Select column to filter");
    let current_col = state.filter_column.clone().unwrap_or_default();
    let mut picked_col = None;
    egui::ComboBox::from_id_salt("filter_column")
        .selected_text(&current_col)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for col in &state.filter_columns {
                if ui.selectable_label(current_col == *col, col).clicked() {
                    picked_col = Some(col.clone());
                }
            }
        });
    if let Some(col) = picked_col {
        state.select_filter_column(Some(col));
    }

    ui.add_space(6.0);

    // ---- Filter value ----
    ui.strong(format!("Select {current_col}"));
    ui.add(
        egui::TextEdit::singleline(&mut state.value_search)
            .hint_text("search values…")
            .desired_width(f32::INFINITY),
    );

    let current_value = state
        .filter_value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let mut picked_value = None;
    let matches = search_values(&state.value_options, &state.value_search);
    ui.label(
        RichText::new(format!(
            "{} of {} values",
            matches.len(),
            state.value_options.len()
        ))
        .small(),
    );
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ScrollArea::vertical()
            .id_salt("filter_values")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show_rows(ui, ui.text_style_height(&egui::TextStyle::Body), matches.len(), |ui, range| {
                for val in &matches[range] {
                    let selected = state.filter_value.as_ref() == Some(*val);
                    if ui.selectable_label(selected, val.to_string()).clicked() {
                        picked_value = Some((*val).clone());
                    }
                }
            });
    });
    if !current_value.is_empty() {
        ui.label(RichText::new(format!("Selected: {current_value}")).color(DEEP_BLUE));
    }
    if let Some(val) = picked_value {
        state.select_filter_value(Some(val));
    }

    ui.add_space(12.0);
    ui.heading("📊 Visualization Options");
    ui.separator();

    // ---- Numeric column ----
    ui.strong("Select a numeric column");
    let current_num = state.numeric_column.clone().unwrap_or_default();
    let mut picked_num = None;
    egui::ComboBox::from_id_salt("numeric_column")
        .selected_text(&current_num)
        .width(ui.available_width())
        .height(300.0)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &state.numeric_columns {
                if ui.selectable_label(current_num == *col, col).clicked() {
                    picked_num = Some(col.clone());
                }
            }
        });
    if let Some(col) = picked_num {
        state.select_numeric_column(Some(col));
    }
    if state.numeric_columns.is_empty() {
        ui.label("The dataset has no numeric columns.");
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open local dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload from source").clicked() {
                let source = state.source.clone();
                // Failures are stored on the state and rendered below.
                let _ = state.load(&source);
                ui.close_menu();
            }
            if ui.button("Reload default database").clicked() {
                let _ = state.load_default();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} columns loaded, {} filtered",
                ds.len(),
                ds.columns.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(DEEP_BLUE));
        }
    });
}

// ---------------------------------------------------------------------------
// Banner and introduction
// ---------------------------------------------------------------------------

/// Logo, welcome box, model description and diagram.
pub fn banner(ui: &mut Ui, config: &AppConfig) {
    ui.add(
        egui::Image::from_uri(&config.logo_url)
            .max_width(150.0)
            .corner_radius(4.0),
    );
    ui.add_space(6.0);

    egui::Frame::new()
        .fill(BANNER_FILL)
        .corner_radius(10.0)
        .inner_margin(20.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new("🌊 Welcome to Chemical Hazard Database 🔬 🌍")
                        .size(22.0)
                        .strong()
                        .color(DEEP_BLUE),
                );
            });
        });
    ui.add_space(8.0);

    ui.label(
        RichText::new(
            "A user-friendly software interface covering ecotoxicological and hazard data \
             estimates, facilitating rapid quantitative prediction of chemical toxicity without \
             relying on animal testing, supporting marine ecological risk assessment.",
        )
        .size(16.0),
    );
    ui.add_space(6.0);

    ui.add(egui::Image::from_uri(&config.diagram_url).max_width(ui.available_width().min(900.0)));
    ui.label(RichText::new("Deep Learning Model for Marine Ecological Risk Assessment").italics());
    ui.add_space(6.0);

    ui.label(
        RichText::new(
            "A multi-task deep-learning model based on molecular graph and exposure duration \
             enables end-to-end prediction of chemical toxicity for 18 marine organisms spanning \
             five phyla.",
        )
        .size(16.0),
    );
    ui.add_space(10.0);
}

/// The single user-visible failure surface.
pub fn load_error(ui: &mut Ui, err: &str) {
    egui::Frame::new()
        .fill(Color32::from_rgb(0xff, 0xeb, 0xee))
        .corner_radius(6.0)
        .inner_margin(12.0)
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(format!("❌ Failed to load file: {err}")).color(Color32::RED));
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open hazard dataset")
        .add_filter("Supported files", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // Errors are logged and kept on the state by `load`.
        let _ = state.load(&path.to_string_lossy());
    }
}

/// Ask where to save the filtered rows and write them.
pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.save_filtered(&path) {
            log::error!("Failed to export filtered data: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
