//! Job options and configuration.

use crate::error::{Error, Result};
use crate::geometry::{AnchorSpec, DEFAULT_MAX_DPI, DEFAULT_MIN_DPI};
use crate::layout::DEFAULT_PADDING_PX;
use std::path::PathBuf;

/// Side of a passport photo in inches.
pub const DEFAULT_PHOTO_SIZE_IN: f64 = 2.0;

/// Options for cropping a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct CropOptions {
    /// Where the crop window sits when aspect ratios differ
    pub anchor: AnchorSpec,

    /// Target width in inches (only the ratio matters)
    pub width_in: f64,

    /// Target height in inches (only the ratio matters)
    pub height_in: f64,

    /// Directory for the cropped file (next to the source if not set)
    pub output_dir: Option<PathBuf>,
}

impl CropOptions {
    /// Create crop options for a `width_in` x `height_in` target.
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            anchor: AnchorSpec::center(),
            width_in,
            height_in,
            output_dir: None,
        }
    }

    /// Set the anchor.
    pub fn with_anchor(mut self, anchor: AnchorSpec) -> Self {
        self.anchor = anchor;
        self
    }

    /// Write the result into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Target width / height.
    pub fn aspect(&self) -> f64 {
        self.width_in / self.height_in
    }

    /// Check that the target size is usable.
    pub fn validate(&self) -> Result<()> {
        positive_inches("crop width", self.width_in)?;
        positive_inches("crop height", self.height_in)
    }
}

/// Options for a passport sheet run.
#[derive(Debug, Clone, PartialEq)]
pub struct PassportOptions {
    /// Crop anchor applied to every photo
    pub anchor: AnchorSpec,

    /// Page width in inches
    pub page_width_in: f64,

    /// Page height in inches
    pub page_height_in: f64,

    /// Printed side of each square photo in inches
    pub photo_size_in: f64,

    /// Upper bound on the resolved density
    pub max_dpi: Option<u32>,

    /// Whether to use parallel processing
    pub parallel: bool,
}

impl PassportOptions {
    /// Create passport options for a page of the given size.
    pub fn new(page_width_in: f64, page_height_in: f64) -> Self {
        Self {
            anchor: AnchorSpec::center(),
            page_width_in,
            page_height_in,
            photo_size_in: DEFAULT_PHOTO_SIZE_IN,
            max_dpi: Some(DEFAULT_MAX_DPI),
            parallel: true,
        }
    }

    /// Set the anchor.
    pub fn with_anchor(mut self, anchor: AnchorSpec) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the printed photo size.
    pub fn with_photo_size(mut self, inches: f64) -> Self {
        self.photo_size_in = inches;
        self
    }

    /// Set or remove the density ceiling.
    pub fn with_max_dpi(mut self, max_dpi: Option<u32>) -> Self {
        self.max_dpi = max_dpi;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that the page and photo sizes are usable.
    pub fn validate(&self) -> Result<()> {
        positive_inches("page width", self.page_width_in)?;
        positive_inches("page height", self.page_height_in)?;
        positive_inches("photo size", self.photo_size_in)?;
        if self.photo_size_in > self.page_width_in || self.photo_size_in > self.page_height_in {
            return Err(Error::InvalidConfig(format!(
                "a {} inch photo does not fit on a {} x {} inch page",
                self.photo_size_in, self.page_width_in, self.page_height_in
            )));
        }
        Ok(())
    }
}

/// Options for a thumbnail sheet run.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOptions {
    /// Longest printed side of a thumbnail in inches
    pub max_dimension_in: f64,

    /// Page width in inches
    pub page_width_in: f64,

    /// Page height in inches
    pub page_height_in: f64,

    /// Gap between thumbnails and rows in pixels
    pub padding_px: u32,

    /// Lower bound on the resolved density
    pub min_dpi: Option<u32>,

    /// Whether to use parallel processing
    pub parallel: bool,
}

impl ThumbnailOptions {
    /// Create thumbnail options.
    pub fn new(max_dimension_in: f64, page_width_in: f64, page_height_in: f64) -> Self {
        Self {
            max_dimension_in,
            page_width_in,
            page_height_in,
            padding_px: DEFAULT_PADDING_PX,
            min_dpi: Some(DEFAULT_MIN_DPI),
            parallel: true,
        }
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding_px: u32) -> Self {
        self.padding_px = padding_px;
        self
    }

    /// Set or remove the density floor.
    pub fn with_min_dpi(mut self, min_dpi: Option<u32>) -> Self {
        self.min_dpi = min_dpi;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that the page and thumbnail sizes are usable.
    pub fn validate(&self) -> Result<()> {
        positive_inches("thumbnail size", self.max_dimension_in)?;
        positive_inches("page width", self.page_width_in)?;
        positive_inches("page height", self.page_height_in)
    }
}

fn positive_inches(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be a positive number of inches, got {}",
            what, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passport_defaults() {
        let options = PassportOptions::new(6.0, 4.0);
        assert_eq!(options.photo_size_in, 2.0);
        assert_eq!(options.max_dpi, Some(600));
        assert!(options.parallel);
        assert_eq!(options.anchor, AnchorSpec::center());
    }

    #[test]
    fn test_thumbnail_builder() {
        let options = ThumbnailOptions::new(3.2, 8.5, 11.0)
            .with_padding(0)
            .with_min_dpi(None)
            .sequential();
        assert_eq!(options.padding_px, 0);
        assert_eq!(options.min_dpi, None);
        assert!(!options.parallel);
    }

    #[test]
    fn test_validation() {
        assert!(CropOptions::new(2.0, 3.0).validate().is_ok());
        assert!(CropOptions::new(0.0, 3.0).validate().is_err());
        assert!(CropOptions::new(2.0, f64::NAN).validate().is_err());

        assert!(PassportOptions::new(6.0, 4.0).validate().is_ok());
        assert!(PassportOptions::new(1.5, 4.0).validate().is_err());
        assert!(ThumbnailOptions::new(-1.0, 8.5, 11.0).validate().is_err());
    }

    #[test]
    fn test_crop_aspect() {
        let options = CropOptions::new(2.0, 3.0);
        assert!((options.aspect() - 2.0 / 3.0).abs() < 1e-12);
    }
}
