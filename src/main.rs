//! NYC Labor Map - Neighborhood Unemployment Map & Labor Force Chart Viewer
//!
//! A choropleth of NYC neighborhoods colored by unemployment rate, with a
//! neighborhood dropdown and a labor-force pie chart kept on the same selection.

mod charts;
mod config;
mod data;
mod format;
mod gui;
mod interaction;
mod map;

use anyhow::anyhow;
use clap::Parser;
use config::{AppConfig, Args};
use eframe::egui;
use gui::NycLaborMapApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_args(Args::parse());
    log::info!("Dataset source: {}", config.source);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("NYC Labor Map"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "NYC Labor Map",
        options,
        Box::new(move |cc| Ok(Box::new(NycLaborMapApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("Failed to start window: {}", e))
}
