mod app;
mod color;
mod state;
mod ui;

use app::DashboardApp;
use eframe::egui;
use nextload_dashboard::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NextLoad – Logistics Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(config)))),
    )
}
