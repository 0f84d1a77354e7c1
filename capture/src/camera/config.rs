use crate::error::{CaptureError, Result};

/// Which camera to open and what to ask it for.
///
/// Resolution and FPS are requests; the driver may pick something else,
/// which [`super::OpenCvCamera`] logs after opening.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Device index, 0 is the built-in notebook camera
    pub index: i32,
    pub resolution: Option<(u32, u32)>,
    pub fps: Option<f64>,
}

impl CameraConfig {
    const FPS_RANGE: (f64, f64) = (1.0, 240.0);
    const MAX_DIMENSION: u32 = 7680;

    pub fn new(index: i32) -> Self {
        Self {
            index,
            resolution: None,
            fps: None,
        }
    }

    /// Requests a frame rate, clamped to 1..=240.
    pub fn with_fps(mut self, fps: f64) -> Result<Self> {
        if !fps.is_finite() {
            return Err(CaptureError::Config(format!(
                "fps must be a finite number, got {}",
                fps
            )));
        }
        self.fps = Some(fps.clamp(Self::FPS_RANGE.0, Self::FPS_RANGE.1));
        Ok(self)
    }

    /// Requests a resolution; each side must be within 1..=7680.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Result<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if value == 0 || value > Self::MAX_DIMENSION {
                return Err(CaptureError::Config(format!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    Self::MAX_DIMENSION,
                    value
                )));
            }
        }
        self.resolution = Some((width, height));
        Ok(self)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_camera_without_requests() {
        let config = CameraConfig::default();
        assert_eq!(config.index, 0);
        assert_eq!(config.resolution, None);
        assert_eq!(config.fps, None);
    }

    #[test]
    fn test_fps_is_clamped() {
        assert_eq!(CameraConfig::new(0).with_fps(0.2).unwrap().fps, Some(1.0));
        assert_eq!(CameraConfig::new(0).with_fps(500.0).unwrap().fps, Some(240.0));
        assert_eq!(CameraConfig::new(0).with_fps(25.0).unwrap().fps, Some(25.0));
    }

    #[test]
    fn test_fps_must_be_finite() {
        assert!(CameraConfig::new(0).with_fps(f64::NAN).is_err());
        assert!(matches!(
            CameraConfig::new(0).with_fps(f64::INFINITY),
            Err(CaptureError::Config(_))
        ));
    }

    #[test]
    fn test_resolution_bounds() {
        let config = CameraConfig::new(1).with_resolution(1280, 720).unwrap();
        assert_eq!(config.resolution, Some((1280, 720)));

        assert!(CameraConfig::new(0).with_resolution(0, 480).is_err());
        assert!(CameraConfig::new(0).with_resolution(640, 9000).is_err());
        assert!(CameraConfig::new(0).with_resolution(7680, 7680).is_ok());
    }
}
