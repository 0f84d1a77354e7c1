//! OpenCV-backed camera device.

pub mod config;
pub mod device;

pub use config::CameraConfig;
pub use device::OpenCvCamera;
