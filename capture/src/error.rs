//! Error types for capture, conversion and snapshot operations.

use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, CaptureError>;

#[derive(Debug)]
pub enum CaptureError {
    /// The camera could not be opened at startup
    DeviceOpen(String),
    /// A read from an open camera failed
    Camera(String),
    /// OpenCV call failed
    OpenCv(opencv::Error),
    /// Color conversion produced an unexpected buffer
    Conversion(String),
    /// The device returned a frame with no pixels
    EmptyFrame,
    /// Matrix type that is not 8-bit gray, BGR or BGRA
    UnsupportedLayout(i32),
    /// Snapshot target is not an existing directory
    InvalidDirectory(String),
    /// The image encoder refused to write the file
    Save(String),
    /// Invalid configuration value
    Config(String),
    /// Capture thread could not be started or died unexpectedly
    Worker(String),
    Io(io::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::DeviceOpen(msg) => write!(f, "Cannot open camera: {}", msg),
            CaptureError::Camera(msg) => write!(f, "Camera error: {}", msg),
            CaptureError::OpenCv(err) => write!(f, "OpenCV error: {}", err),
            CaptureError::Conversion(msg) => write!(f, "Conversion failed: {}", msg),
            CaptureError::EmptyFrame => write!(f, "Camera returned an empty frame"),
            CaptureError::UnsupportedLayout(typ) => {
                write!(f, "Unsupported pixel layout (matrix type {})", typ)
            }
            CaptureError::InvalidDirectory(dir) => {
                write!(f, "'{}' is not an existing directory", dir)
            }
            CaptureError::Save(msg) => write!(f, "Save failed: {}", msg),
            CaptureError::Config(msg) => write!(f, "Config error: {}", msg),
            CaptureError::Worker(msg) => write!(f, "Capture worker error: {}", msg),
            CaptureError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<io::Error> for CaptureError {
    fn from(err: io::Error) -> Self {
        CaptureError::Io(err)
    }
}

impl From<opencv::Error> for CaptureError {
    fn from(err: opencv::Error) -> Self {
        CaptureError::OpenCv(err)
    }
}
