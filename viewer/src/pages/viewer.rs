//! The single application page: controls on the left, live image in the
//! middle, throughput and errors along the bottom.

use crate::events::UiCommand;
use capture::{CaptureMode, ImageFormat};
use egui::{Color32, RichText};
use std::time::Duration;

const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
const MUTED: Color32 = Color32::from_rgb(148, 163, 184);
const DANGER: Color32 = Color32::from_rgb(239, 68, 68);

/// Read-only snapshot of the state the page draws.
pub struct ViewerView<'a> {
    pub mode: CaptureMode,
    pub format: ImageFormat,
    pub save_dir: &'a str,
    pub texture: Option<&'a egui::TextureHandle>,
    pub camera_ready: bool,
    pub can_save: bool,
    pub fps_label: &'a str,
    pub frame_age: Option<Duration>,
    pub dropped: u64,
    pub last_error: Option<&'a str>,
}

pub struct ViewerPage;

impl ViewerPage {
    pub fn show(ctx: &egui::Context, view: &ViewerView<'_>) -> Option<UiCommand> {
        let mut command = None;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            Self::render_status(ui, view);
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(230.0)
            .show(ctx, |ui| {
                command = Self::render_controls(ui, view);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            Self::render_image(ui, view);
        });

        command
    }

    fn render_controls(ui: &mut egui::Ui, view: &ViewerView<'_>) -> Option<UiCommand> {
        let mut command = None;
        ui.add_enabled_ui(view.camera_ready, |ui| {
            ui.add_space(12.0);
            Self::section_title(ui, "Acquisition");

            let mut mode = view.mode;
            ui.radio_value(&mut mode, CaptureMode::Continuous, "Continuous");
            ui.radio_value(&mut mode, CaptureMode::Triggered, "Triggered");
            if mode != view.mode {
                command = Some(UiCommand::SelectMode(mode));
            }

            ui.add_space(6.0);
            let trigger = egui::Button::new(RichText::new("📷 Take picture").size(15.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui
                .add_enabled(view.mode == CaptureMode::Triggered, trigger)
                .clicked()
            {
                command = Some(UiCommand::TakePicture);
            }
        });

        ui.add_space(18.0);
        ui.separator();
        Self::section_title(ui, "Snapshot");

        let mut format = view.format;
        ui.horizontal(|ui| {
            for candidate in ImageFormat::ALL {
                ui.radio_value(&mut format, candidate, candidate.to_string());
            }
        });
        if format != view.format {
            command = Some(UiCommand::SelectFormat(format));
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Directory").color(MUTED));
        let mut dir = view.save_dir.to_string();
        let field = ui.add(
            egui::TextEdit::singleline(&mut dir)
                .hint_text("e.g., /home/user/Pictures")
                .desired_width(f32::INFINITY),
        );
        if field.changed() {
            command = Some(UiCommand::SetSaveDir(dir));
        }
        if ui.small_button("Use default").clicked() {
            command = Some(UiCommand::UseDefaultSaveDir);
        }

        ui.add_space(10.0);
        let save = egui::Button::new(RichText::new("💾 Save").size(15.0).color(Color32::WHITE))
            .fill(ACCENT)
            .min_size(egui::vec2(200.0, 30.0));
        if ui
            .add_enabled(view.can_save, save)
            .on_disabled_hover_text("No frame displayed yet")
            .clicked()
        {
            command = Some(UiCommand::Save);
        }

        command
    }

    fn render_image(ui: &mut egui::Ui, view: &ViewerView<'_>) {
        let Some(texture) = view.texture else {
            ui.centered_and_justified(|ui| {
                let text = if view.camera_ready {
                    "Waiting for camera..."
                } else {
                    "Camera unavailable"
                };
                ui.label(RichText::new(text).size(20.0).color(MUTED));
            });
            return;
        };

        let size = fit_size(texture.size_vec2(), ui.available_size());
        ui.centered_and_justified(|ui| {
            ui.image((texture.id(), size));
        });
    }

    fn render_status(ui: &mut egui::Ui, view: &ViewerView<'_>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(view.fps_label).monospace());
            if let Some(age) = view.frame_age {
                ui.separator();
                ui.label(
                    RichText::new(format!("latency: {} ms", age.as_millis()))
                        .monospace()
                        .color(MUTED),
                );
            }
            if view.dropped > 0 {
                ui.separator();
                ui.label(RichText::new(format!("dropped: {}", view.dropped)).color(MUTED));
            }
            if let Some(error) = view.last_error {
                ui.separator();
                ui.label(RichText::new(error).color(DANGER));
            }
        });
    }

    fn section_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(16.0).strong().color(ACCENT));
        ui.add_space(4.0);
    }
}

/// Largest size with the image's aspect ratio that fits in `available`.
fn fit_size(image: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y).max(0.0);
    image * scale
}
