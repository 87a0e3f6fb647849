#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod theme;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("⚡ PitchReel")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "PitchReel",
        native_options,
        Box::new(|cc| Ok(Box::new(app::PitchReelApp::new(cc)))),
    )
}
