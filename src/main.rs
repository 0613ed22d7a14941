//! Code Share - local code snippet manager
//!
//! Create, edit, preview, copy, download and upload text files, kept in a
//! local data directory, with language detection and keyword highlighting.

mod app;
mod core;
mod ui;

use app::CodeShareApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Code Share...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Code Share"),
        ..Default::default()
    };

    eframe::run_native(
        "Code Share",
        native_options,
        Box::new(|cc| Ok(Box::new(CodeShareApp::new(cc)))),
    )
}
