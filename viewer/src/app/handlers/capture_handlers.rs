//! Mode switching and the software trigger.

use crate::app::state::App;
use capture::CaptureMode;

impl App {
    pub(in crate::app) fn handle_select_mode(&mut self, mode: CaptureMode) {
        if self.mode == mode {
            return;
        }
        self.logger
            .info(&format!("[UI] Mode {:?} -> {:?}", self.mode, mode));
        self.mode = mode;

        match &self.worker {
            Some(worker) => worker.set_mode(mode),
            None => self
                .logger
                .warn("[UI] Mode changed without a camera; nothing to apply"),
        }
    }

    pub(in crate::app) fn handle_take_picture(&mut self) {
        let Some(worker) = &self.worker else {
            self.logger.warn("[UI] Take picture ignored: no camera");
            return;
        };

        if self.mode != CaptureMode::Triggered {
            self.logger
                .debug("[UI] Take picture ignored outside triggered mode");
            return;
        }

        if !worker.start() {
            self.logger
                .debug("[UI] Trigger already pending or running");
        }
    }
}
