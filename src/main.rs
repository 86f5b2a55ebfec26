// src/main.rs
use anyhow::Result;
use eframe::egui;

use logscope::app::DashboardApp;
use logscope::config::ApiConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = ApiConfig::from_env();
    log::info!("backend: {}", config.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("LogScope"),
        ..Default::default()
    };

    eframe::run_native(
        "LogScope",
        options,
        Box::new(move |_cc| Box::new(DashboardApp::new(&config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
