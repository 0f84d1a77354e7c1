//! Blocking message box for errors and warnings that need acknowledgement.

use crate::events::UiCommand;
use egui::{Align2, Color32, Margin, RichText, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Error,
}

impl AlertKind {
    fn accent(self) -> Color32 {
        match self {
            AlertKind::Warning => Color32::from_rgb(245, 158, 11),
            AlertKind::Error => Color32::from_rgb(239, 68, 68),
        }
    }
}

/// Centered message box with a single OK button.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Dims the rest of the window and draws the box. Returns
    /// `UiCommand::DismissAlert` once OK is clicked.
    pub fn show(&self, ctx: &egui::Context) -> Option<UiCommand> {
        let screen = ctx.content_rect();
        egui::Area::new(egui::Id::new("alert_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(140));
                ui.allocate_rect(screen, egui::Sense::click());
            });

        let mut command = None;
        egui::Window::new(&self.title)
            .id(egui::Id::new("alert_window"))
            .order(egui::Order::Foreground)
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([380.0, 160.0])
            .frame(
                egui::Frame::new()
                    .fill(Color32::from_rgb(30, 41, 59))
                    .stroke(egui::Stroke::new(1.5, self.kind.accent()))
                    .corner_radius(12.0)
                    .inner_margin(Margin::same(20)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(&self.title)
                            .size(20.0)
                            .strong()
                            .color(self.kind.accent()),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(&self.message)
                            .size(14.0)
                            .color(Color32::from_rgb(226, 232, 240)),
                    );
                    ui.add_space(18.0);

                    let ok = egui::Button::new(RichText::new("OK").size(15.0).color(Color32::WHITE))
                        .fill(self.kind.accent())
                        .corner_radius(8.0)
                        .min_size(Vec2::new(110.0, 34.0));
                    if ui.add(ok).clicked() {
                        command = Some(UiCommand::DismissAlert);
                    }
                });
            });

        command
    }
}
