//! TP53 Cancer Resistance Explorer
//!
//! A Rust application for browsing precomputed TP53 comparative-analysis
//! results: a features table, cleaned protein sequences, and three
//! pre-rendered figures.

use mimalloc::MiMalloc;
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod data;

use app::ExplorerApp;

/// Base directory holding data/ and images/, from TP53_EXPLORER_DATA or
/// the current directory.
fn data_root() -> PathBuf {
    std::env::var_os("TP53_EXPLORER_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("TP53 Cancer Resistance Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "TP53 Cancer Resistance Explorer",
        native_options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, data_root())))),
    )
}
