//! Short-lived corner notification for successful actions.

use egui::{Align2, Color32, RichText};
use std::time::{Duration, Instant};

const LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
    lifetime: Duration,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
            lifetime: LIFETIME,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.lifetime
    }

    /// Draws the toast; returns `true` once it should be removed.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        if self.is_expired_at(Instant::now()) {
            return true;
        }

        let mut dismissed = false;
        egui::Window::new("toast")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(Color32::from_rgba_premultiplied(30, 80, 30, 230))
                    .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 200, 100)))
                    .corner_radius(8.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("✅").size(20.0));
                    ui.label(RichText::new(&self.message).color(Color32::WHITE));
                    if ui.small_button("✕").clicked() {
                        dismissed = true;
                    }
                });
            });

        // Keep repainting so the toast disappears on time without input.
        ctx.request_repaint_after(Duration::from_millis(250));
        dismissed
    }
}
