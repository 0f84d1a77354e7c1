//! Captured frame representation.

use crate::error::{CaptureError, Result};
use opencv::core::{CV_8UC1, CV_8UC3, CV_8UC4, Mat};
use opencv::prelude::*;
use std::fmt;
use std::time::Instant;

/// Channel layout of an 8-bit frame, in OpenCV's native channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel gray
    Gray,
    /// Three channel color, blue first
    Bgr,
    /// Four channel color with alpha, blue first
    Bgra,
}

impl PixelLayout {
    /// Maps an OpenCV matrix type to a layout.
    ///
    /// Anything other than `CV_8UC1`, `CV_8UC3` or `CV_8UC4` is rejected
    /// instead of being silently ignored further down the pipeline.
    pub fn from_mat_type(typ: i32) -> Result<Self> {
        match typ {
            CV_8UC1 => Ok(PixelLayout::Gray),
            CV_8UC3 => Ok(PixelLayout::Bgr),
            CV_8UC4 => Ok(PixelLayout::Bgra),
            other => Err(CaptureError::UnsupportedLayout(other)),
        }
    }

    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Bgr => 3,
            PixelLayout::Bgra => 4,
        }
    }
}

/// A validated camera frame.
///
/// Wraps the OpenCV matrix together with its layout, dimensions and the
/// instant it was created.
#[derive(Clone)]
pub struct Frame {
    data: Mat,
    layout: PixelLayout,
    width: u32,
    height: u32,
    captured_at: Instant,
}

impl Frame {
    /// Wraps `mat`, rejecting empty matrices and unsupported layouts.
    pub fn new(mat: Mat) -> Result<Self> {
        if mat.empty() || mat.cols() <= 0 || mat.rows() <= 0 {
            return Err(CaptureError::EmptyFrame);
        }
        let layout = PixelLayout::from_mat_type(mat.typ())?;

        Ok(Self {
            width: mat.cols() as u32,
            height: mat.rows() as u32,
            data: mat,
            layout,
            captured_at: Instant::now(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    /// Borrow the underlying matrix.
    pub fn data(&self) -> &Mat {
        &self.data
    }

    pub fn into_mat(self) -> Mat {
        self.data
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("layout", &self.layout)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
