use eframe::egui;

use hazard_viewer::color::OCEAN_BACKGROUND;
use hazard_viewer::config::AppConfig;
use hazard_viewer::state::AppState;

use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HazardViewerApp {
    pub state: AppState,
}

impl HazardViewerApp {
    /// Build the app and run the initial load. A failure is kept in the
    /// state and rendered as an error message.
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        // Already logged and stored on the state.
        let _ = state.load_default();
        Self { state }
    }
}

impl eframe::App for HazardViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + visualisation options ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: banner, tables, charts ----
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(OCEAN_BACKGROUND))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        panels::banner(ui, &self.state.config);

                        if let Some(err) = &self.state.load_error {
                            panels::load_error(ui, err);
                            return;
                        }
                        if self.state.dataset.is_none() {
                            return;
                        }

                        table::preview_section(ui, &self.state);
                        table::statistics_section(ui, &self.state);
                        table::filtered_section(ui, &mut self.state);
                        plot::bar_chart(ui, &self.state);
                        plot::line_chart(ui, &self.state);
                    });
            });
    }
}
