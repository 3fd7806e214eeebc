//! Page and placement rectangles in pixel space.

use super::density::inches_to_px;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Pixel size of one output page at the run's density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in pixels
    pub width_px: u32,
    /// Page height in pixels
    pub height_px: u32,
}

impl PageGeometry {
    /// Create a geometry from pixel dimensions.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// Convert a physical page size to pixels at `dpi`.
    ///
    /// Each axis is truncated to whole pixels.
    pub fn from_inches(width_in: f64, height_in: f64, dpi: u32) -> Result<Self> {
        for (name, value) in [("width", width_in), ("height", height_in)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "page {} must be a positive number of inches, got {}",
                    name, value
                )));
            }
        }

        let geometry = Self::new(inches_to_px(width_in, dpi), inches_to_px(height_in, dpi));
        if geometry.width_px == 0 || geometry.height_px == 0 {
            return Err(Error::InvalidConfig(format!(
                "page {}\" x {}\" is empty at {} dpi",
                width_in, height_in, dpi
            )));
        }

        Ok(geometry)
    }

    /// Page dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width_px > self.height_px
    }
}

/// Target rectangle on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Create a rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Check whether the rectangle lies fully inside `page`.
    pub fn fits_within(&self, page: &PageGeometry) -> bool {
        self.right() <= page.width_px && self.bottom() <= page.height_px
    }

    /// Check whether two rectangles share any pixel.
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
