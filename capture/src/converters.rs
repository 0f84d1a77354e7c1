//! Conversion of captured frames into display-ready RGBA pixels.

use crate::error::{CaptureError, Result};
use crate::frame::{Frame, PixelLayout};
use opencv::core::Mat;
use opencv::imgproc::{self, COLOR_BGR2RGBA, COLOR_BGRA2RGBA, COLOR_GRAY2RGBA};
use opencv::prelude::*;

/// Tightly packed, non-premultiplied RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Converts any supported frame layout into RGBA.
pub fn to_rgba(frame: &Frame) -> Result<RgbaBuffer> {
    let code = match frame.layout() {
        PixelLayout::Gray => COLOR_GRAY2RGBA,
        PixelLayout::Bgr => COLOR_BGR2RGBA,
        PixelLayout::Bgra => COLOR_BGRA2RGBA,
    };

    let mut rgba = Mat::default();
    imgproc::cvt_color_def(frame.data(), &mut rgba, code)?;

    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let pixels = rgba.data_bytes()?.to_vec();

    if pixels.len() != width * height * 4 {
        return Err(CaptureError::Conversion(format!(
            "RGBA buffer has {} bytes, expected {}",
            pixels.len(),
            width * height * 4
        )));
    }

    Ok(RgbaBuffer {
        width,
        height,
        pixels,
    })
}
