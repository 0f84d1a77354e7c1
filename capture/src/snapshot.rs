//! Saving frames to disk under timestamp-derived names.
//!
//! File names follow `yyyy_MM_dd_HH_mm_ss_SSS.<ext>` (24-hour clock,
//! milliseconds last), so snapshots sort chronologically in a file browser.
//! The timestamp is passed in rather than read here, which keeps
//! [`snapshot_file_name`] pure.
//!
//! JPEG and BMP carry no alpha channel; BGRA frames are reduced to BGR
//! before encoding. PNG keeps all four channels.

use crate::error::{CaptureError, Result};
use crate::frame::{Frame, PixelLayout};
use chrono::{DateTime, TimeZone};
use opencv::core::Mat;
use opencv::imgcodecs;
use opencv::imgproc::{self, COLOR_BGRA2BGR};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// `2024_01_01_13_05_09_042`: year, month, day, 24h hour, minute, second, millis.
const FILE_STEM_FORMAT: &str = "%Y_%m_%d_%H_%M_%S_%3f";

/// Encodings offered for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Jpg,
    Bmp,
    Png,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Jpg, ImageFormat::Bmp, ImageFormat::Png];

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Png => "png",
        }
    }

    /// Whether the encoder needs an alpha channel stripped first.
    fn drops_alpha(self) -> bool {
        match self {
            ImageFormat::Jpg | ImageFormat::Bmp => true,
            ImageFormat::Png => false,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for ImageFormat {
    type Err = CaptureError;

    /// Accepts `jpg`, `.PNG`, `jpeg` and similar spellings.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match name.as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "bmp" => Ok(ImageFormat::Bmp),
            "png" => Ok(ImageFormat::Png),
            _ => Err(CaptureError::Config(format!("unknown image format '{}'", s))),
        }
    }
}

/// File name for a snapshot taken at `at`.
pub fn snapshot_file_name<Tz>(at: &DateTime<Tz>, format: ImageFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{}.{}", at.format(FILE_STEM_FORMAT), format.extension())
}

/// Writes `frame` into `dir` and returns the path of the new file.
///
/// # Errors
///
/// * `InvalidDirectory` if `dir` does not exist or is not a directory;
///   nothing is written.
/// * `Save` / `OpenCv` if the encoder fails.
pub fn save_frame<Tz>(
    frame: &Frame,
    dir: &Path,
    format: ImageFormat,
    at: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !dir.is_dir() {
        return Err(CaptureError::InvalidDirectory(dir.display().to_string()));
    }

    let path = dir.join(snapshot_file_name(at, format));
    let target = path
        .to_str()
        .ok_or_else(|| CaptureError::Save(format!("path is not UTF-8: {}", path.display())))?;

    let stripped;
    let image: &Mat = if frame.layout() == PixelLayout::Bgra && format.drops_alpha() {
        let mut bgr = Mat::default();
        imgproc::cvt_color_def(frame.data(), &mut bgr, COLOR_BGRA2BGR)?;
        stripped = bgr;
        &stripped
    } else {
        frame.data()
    };

    if !imgcodecs::imwrite_def(target, image)? {
        return Err(CaptureError::Save(format!(
            "encoder refused to write {}",
            path.display()
        )));
    }

    Ok(path)
}
