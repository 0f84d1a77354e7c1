//! Camera frame acquisition.
//!
//! A [`CaptureWorker`] owns the camera on a dedicated thread and runs in one
//! of two modes: continuous streaming, or software trigger where exactly one
//! frame is grabbed per [`CaptureWorker::start`] call. Frames are handed to
//! the consumer through a bounded drop-oldest [`FrameReceiver`].
//!
//! # Modules
//!
//! - **camera**: device configuration and the OpenCV-backed [`OpenCvCamera`]
//! - **frame**: the validated [`Frame`] type (8-bit gray, BGR or BGRA)
//! - **converters**: layout-aware conversion to RGBA for display
//! - **snapshot**: saving frames as JPG, BMP or PNG
//! - **worker**: the capture thread, trigger gate and mailbox
//!
//! # Threads
//!
//! The capture thread is the only owner of the device. The consumer only
//! touches the worker through [`CaptureWorker`] methods and the
//! [`FrameReceiver`], neither of which blocks on the device.

pub mod camera;
pub mod converters;
pub mod error;
pub mod frame;
pub mod snapshot;
pub mod traits;
pub mod worker;

pub use camera::{CameraConfig, OpenCvCamera};
pub use converters::{RgbaBuffer, to_rgba};
pub use error::{CaptureError, Result};
pub use frame::{Frame, PixelLayout};
pub use snapshot::{ImageFormat, save_frame, snapshot_file_name};
pub use traits::FrameSource;
pub use worker::{CaptureEvent, CaptureMode, CaptureWorker, FrameReceiver, GateStatus, WorkerConfig};
