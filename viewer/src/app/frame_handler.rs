//! Consumes capture events and keeps the display texture current.
//!
//! # Flow
//!
//! 1. `pump_frames` drains the mailbox once per repaint
//! 2. The newest frame is converted to RGBA and written into a single
//!    reused texture (`load_texture` on first use, `set` afterwards)
//! 3. That frame is kept as `last_frame`, the source for Save
//! 4. `publish_fps` closes the one-second window and takes the worker's
//!    frame counter
//!
//! Read failures only update the status bar; the worker keeps going.

use super::state::App;
use crate::logic::{FpsReading, utils};
use capture::{CaptureEvent, Frame};
use std::time::Instant;

impl App {
    /// Drains everything queued since the last repaint. Only the newest
    /// frame is uploaded; older ones in the same batch count as received
    /// but not rendered.
    pub(super) fn pump_frames(&mut self, ctx: &egui::Context) {
        let Some(frames) = &self.frames else {
            return;
        };

        let mut newest: Option<Frame> = None;
        for event in frames.drain() {
            match event {
                CaptureEvent::Frame { frame, grabbed } => {
                    self.meter.record_received(grabbed);
                    newest = Some(frame);
                }
                CaptureEvent::ReadFailed { reason } => {
                    self.logger
                        .debug(&format!("[CAPTURE] Read failed: {}", reason));
                    self.last_error = Some(reason);
                }
            }
        }

        if let Some(frame) = newest {
            self.show_frame(ctx, frame);
        }
    }

    fn show_frame(&mut self, ctx: &egui::Context, frame: Frame) {
        let image = match utils::frame_to_color_image(&frame) {
            Ok(image) => image,
            Err(e) => {
                self.logger
                    .warn(&format!("[UI] Cannot display {:?}: {}", frame, e));
                self.last_error = Some(e.to_string());
                return;
            }
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("camera_frame", image, egui::TextureOptions::LINEAR));
            }
        }

        self.meter.record_rendered();
        self.frame_age = Some(frame.captured_at().elapsed());
        self.last_error = None;
        self.last_frame = Some(frame);
    }

    /// Refreshes the fps label once per window and restarts the worker's
    /// frame counter.
    pub(super) fn publish_fps(&mut self, now: Instant) {
        let Some(reading) = self.meter.tick(now) else {
            return;
        };

        let reading = match &self.worker {
            Some(worker) => FpsReading {
                grabbed: worker.take_frame_counter(),
                ..reading
            },
            None => reading,
        };

        if reading.received > reading.rendered {
            self.logger.debug(&format!(
                "[UI] {} frames received, {} rendered",
                reading.received, reading.rendered
            ));
        }
        self.fps_label = reading.to_string();
    }
}
