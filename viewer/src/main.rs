//! Webcam viewer entry point.

mod app;
mod components;
mod config;
mod events;
mod logic;
mod pages;

use app::App;

fn main() {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("camview - notebook camera"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "camview",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_theme(egui::Theme::Dark);

            let mut style = (*cc.egui_ctx.style()).clone();
            style.visuals.window_fill = egui::Color32::from_rgb(15, 23, 42);
            style.visuals.panel_fill = egui::Color32::from_rgb(15, 23, 42);
            cc.egui_ctx.set_style(style);

            Ok(Box::new(App::new(&cc.egui_ctx)))
        }),
    ) {
        eprintln!("camview failed to start: {}", e);
        std::process::exit(1);
    }
}
