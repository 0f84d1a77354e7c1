//! Device abstraction used by the capture worker.

use crate::error::Result;
use crate::frame::Frame;

/// Anything that can hand out frames on demand.
///
/// The worker calls [`FrameSource::grab`] from its own thread only, so
/// implementations need not be `Sync`. Dropping the source releases the
/// underlying device.
pub trait FrameSource {
    /// Blocks until one frame is available.
    ///
    /// An error is treated as a per-frame failure: the worker reports it
    /// and keeps going.
    fn grab(&mut self) -> Result<Frame>;

    /// Human readable device description for logs.
    fn describe(&self) -> String {
        "frame source".to_string()
    }
}
