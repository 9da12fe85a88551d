#![allow(dead_code)]

mod app;
mod data;
mod gui;
mod view;

use app::SpectralApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    ::log::info!(
        "Starting FT-IR Spectral Viewer v{}",
        env!("CARGO_PKG_VERSION")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 550.0])
            .with_title("FT-IR Spectral Viewer")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "FT-IR Spectral Viewer",
        options,
        Box::new(|cc| Ok(Box::new(SpectralApp::new(cc)))),
    )
}
