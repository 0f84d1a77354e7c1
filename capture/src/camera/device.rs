//! Camera handle over `opencv::videoio::VideoCapture`.
//!
//! The handle is created and dropped on the capture thread. Requested
//! resolution and FPS are applied after opening; drivers are free to ignore
//! them, so the values actually in effect are read back and logged.
//! Dropping the handle releases the device.

use crate::camera::config::CameraConfig;
use crate::error::{CaptureError, Result};
use crate::frame::Frame;
use crate::traits::FrameSource;
use logging::Logger;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{CAP_ANY, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH, VideoCapture};

const PROGRESS_LOG_INTERVAL: u64 = 300;

/// An opened camera. The device is released when this value is dropped.
pub struct OpenCvCamera {
    capture: VideoCapture,
    config: CameraConfig,
    logger: Logger,
    frames_read: u64,
}

impl OpenCvCamera {
    /// Opens the camera at `config.index` and applies the requested settings.
    ///
    /// # Errors
    ///
    /// `CaptureError::DeviceOpen` if the device does not exist or refuses to
    /// open.
    pub fn open(config: CameraConfig, logger: Logger) -> Result<Self> {
        logger.info(&format!("[CAMERA] Opening camera index {}", config.index));

        let mut capture = VideoCapture::new(config.index, CAP_ANY).map_err(|e| {
            CaptureError::DeviceOpen(format!("camera {}: {}", config.index, e))
        })?;

        let opened = capture.is_opened().map_err(|e| {
            CaptureError::DeviceOpen(format!("camera {}: {}", config.index, e))
        })?;
        if !opened {
            return Err(CaptureError::DeviceOpen(format!(
                "camera {} is not available",
                config.index
            )));
        }

        Self::apply(&mut capture, &config, &logger);

        Ok(Self {
            capture,
            config,
            logger,
            frames_read: 0,
        })
    }

    /// Settings the driver rejects are not fatal; the mismatch is logged.
    fn apply(capture: &mut VideoCapture, config: &CameraConfig, logger: &Logger) {
        if let Some((width, height)) = config.resolution {
            let _ = capture.set(CAP_PROP_FRAME_WIDTH, f64::from(width));
            let _ = capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(height));
        }
        if let Some(fps) = config.fps {
            let _ = capture.set(CAP_PROP_FPS, fps);
        }

        let width = capture.get(CAP_PROP_FRAME_WIDTH).unwrap_or(0.0) as u32;
        let height = capture.get(CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0) as u32;
        let fps = capture.get(CAP_PROP_FPS).unwrap_or(0.0);
        logger.info(&format!(
            "[CAMERA] Camera {} delivering {}x{} @ {:.1} fps",
            config.index, width, height, fps
        ));

        if let Some((req_w, req_h)) = config.resolution
            && (req_w, req_h) != (width, height)
        {
            logger.warn(&format!(
                "[CAMERA] Requested {}x{}, driver chose {}x{}",
                req_w, req_h, width, height
            ));
        }
    }
}

impl FrameSource for OpenCvCamera {
    fn grab(&mut self) -> Result<Frame> {
        let mut mat = Mat::default();
        let ok = self
            .capture
            .read(&mut mat)
            .map_err(|e| CaptureError::Camera(format!("read failed: {}", e)))?;
        if !ok {
            return Err(CaptureError::Camera("device returned no frame".to_string()));
        }

        let frame = Frame::new(mat)?;
        self.frames_read += 1;
        if self.frames_read.is_multiple_of(PROGRESS_LOG_INTERVAL) {
            self.logger
                .debug(&format!("[CAMERA] Frames read: {}", self.frames_read));
        }
        Ok(frame)
    }

    fn describe(&self) -> String {
        format!("camera {}", self.config.index)
    }
}

impl Drop for OpenCvCamera {
    fn drop(&mut self) {
        self.logger.info(&format!(
            "[CAMERA] Releasing camera {} after {} frames",
            self.config.index, self.frames_read
        ));
        if let Err(e) = self.capture.release() {
            self.logger
                .error(&format!("[CAMERA] Error releasing camera: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::LogLevel;
    use tempfile::tempdir;

    #[test]
    fn test_missing_device_fails_to_open() {
        let dir = tempdir().unwrap();
        let logger = Logger::new(dir.path().join("camera.log"), LogLevel::Debug).unwrap();

        let result = OpenCvCamera::open(CameraConfig::new(999), logger);
        assert!(matches!(result, Err(CaptureError::DeviceOpen(_))));
    }
}
