mod app;
mod ui;

use app::HazardViewerApp;
use eframe::egui;
use hazard_viewer::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let title = config.window_title.clone();

    // The dataset is fetched before the first frame; every panel renders from it.
    let app = HazardViewerApp::new(config);

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch and render the remote png/jpg banners.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}
