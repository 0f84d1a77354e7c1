//! Snapshot format, directory and the Save action.

use crate::app::state::App;
use capture::{ImageFormat, save_frame};
use chrono::Local;
use std::path::PathBuf;

/// Turns the directory field into a path, `None` when it is blank.
fn resolve_save_dir(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Some(home.join(rest));
    }
    Some(PathBuf::from(trimmed))
}

impl App {
    pub(in crate::app) fn handle_select_format(&mut self, format: ImageFormat) {
        if self.save_format != format {
            self.logger
                .info(&format!("[SAVE] Format set to {}", format));
            self.save_format = format;
        }
    }

    pub(in crate::app) fn handle_use_default_save_dir(&mut self) {
        self.save_dir = self
            .config
            .save_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
    }

    pub(in crate::app) fn handle_save(&mut self) {
        let Some(dir) = resolve_save_dir(&self.save_dir) else {
            self.show_warning("Cannot save", "Choose a directory first.");
            return;
        };

        let Some(frame) = &self.last_frame else {
            self.show_warning("Cannot save", "No frame has been displayed yet.");
            return;
        };

        match save_frame(frame, &dir, self.save_format, &Local::now()) {
            Ok(path) => {
                self.logger
                    .info(&format!("[SAVE] Wrote {}", path.display()));
                self.show_success(format!("Saved {}", path.display()));
            }
            Err(e) => {
                self.logger.error(&format!(
                    "[SAVE] Saving to {} failed: {}",
                    dir.display(),
                    e
                ));
                self.show_warning("Save failed", e.to_string());
            }
        }
    }
}
