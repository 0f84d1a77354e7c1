//! Dispatches view commands to the handlers in `handlers/`.

use super::state::App;
use crate::events::UiCommand;

impl App {
    pub(super) fn handle_ui_command(&mut self, command: UiCommand) {
        self.logger
            .debug(&format!("[UI] Handling command: {:?}", command));
        match command {
            UiCommand::SelectMode(mode) => self.handle_select_mode(mode),
            UiCommand::TakePicture => self.handle_take_picture(),

            UiCommand::SelectFormat(format) => self.handle_select_format(format),
            UiCommand::SetSaveDir(dir) => self.save_dir = dir,
            UiCommand::UseDefaultSaveDir => self.handle_use_default_save_dir(),
            UiCommand::Save => self.handle_save(),

            UiCommand::DismissAlert => self.alert = None,
        }
    }
}
