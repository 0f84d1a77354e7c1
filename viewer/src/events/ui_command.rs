use capture::{CaptureMode, ImageFormat};

/// Actions requested by the view (View -> Controller).
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    // --- Acquisition ---
    SelectMode(CaptureMode),
    /// Software trigger; only offered in triggered mode
    TakePicture,

    // --- Snapshots ---
    SelectFormat(ImageFormat),
    SetSaveDir(String),
    /// Reset the directory to the configured default
    UseDefaultSaveDir,
    Save,

    // --- Dialogs ---
    DismissAlert,
}
