//! Frame to texture conversion.

use capture::{Frame, RgbaBuffer};
use egui::ColorImage;

/// Wraps converted RGBA pixels as an egui image.
pub fn rgba_to_color_image(rgba: &RgbaBuffer) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([rgba.width, rgba.height], &rgba.pixels)
}

/// Gray, BGR and BGRA frames all end up as an RGBA `ColorImage`.
pub fn frame_to_color_image(frame: &Frame) -> capture::Result<ColorImage> {
    let rgba = capture::to_rgba(frame)?;
    Ok(rgba_to_color_image(&rgba))
}
