//! Shared print density (DPI) for a batch of images.
//!
//! The density is the lowest per-image "native" density in the batch,
//! rounded down to a multiple of ten, then clamped by the run's policy.
//! Using the minimum means the lowest-resolution image is the binding
//! constraint and no image needs upscaling at the chosen density.

use crate::error::{Error, Result};
use crate::source::ImageDescriptor;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default upper bound for square (passport) sheets.
pub const DEFAULT_MAX_DPI: u32 = 600;

/// Default lower bound for thumbnail sheets.
pub const DEFAULT_MIN_DPI: u32 = 300;

/// Which side of an image maps onto the reference size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityMode {
    /// The image is square-cropped, so its shorter side spans the reference.
    Square,
    /// The image is scaled whole, so its longer side spans the reference.
    BoundingBox,
}

/// Density mode plus clamping bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityPolicy {
    /// Per-image density rule
    pub mode: DensityMode,
    /// Lower bound applied after rounding
    pub floor: Option<u32>,
    /// Upper bound applied after rounding
    pub ceiling: Option<u32>,
}

impl DensityPolicy {
    /// Passport policy: square mode capped at [`DEFAULT_MAX_DPI`].
    pub fn passport() -> Self {
        Self {
            mode: DensityMode::Square,
            floor: None,
            ceiling: Some(DEFAULT_MAX_DPI),
        }
    }

    /// Thumbnail policy: bounding-box mode raised to at least [`DEFAULT_MIN_DPI`].
    pub fn thumbnail() -> Self {
        Self {
            mode: DensityMode::BoundingBox,
            floor: Some(DEFAULT_MIN_DPI),
            ceiling: None,
        }
    }

    /// Set the lower bound.
    pub fn with_floor(mut self, floor: Option<u32>) -> Self {
        self.floor = floor;
        self
    }

    /// Set the upper bound.
    pub fn with_ceiling(mut self, ceiling: Option<u32>) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Apply floor then ceiling.
    pub fn clamp(&self, density: u32) -> u32 {
        let mut density = density;
        if let Some(floor) = self.floor {
            density = density.max(floor);
        }
        if let Some(ceiling) = self.ceiling {
            density = density.min(ceiling);
        }
        density
    }
}

/// Density at which `image` exactly spans `reference_inches` under `mode`.
pub fn native_dpi(image: &ImageDescriptor, reference_inches: f64, mode: DensityMode) -> f64 {
    let side = match mode {
        DensityMode::Square => image.width.min(image.height),
        DensityMode::BoundingBox => image.width.max(image.height),
    };
    side as f64 / reference_inches
}

/// Lowest native density in the batch, rounded down to a multiple of ten.
///
/// This is the value before any policy clamp.
pub fn raw_density(
    batch: &[ImageDescriptor],
    reference_inches: f64,
    mode: DensityMode,
) -> Result<u32> {
    validate_reference(reference_inches)?;

    let lowest = batch
        .par_iter()
        .map(|image| native_dpi(image, reference_inches, mode))
        .reduce(|| f64::INFINITY, f64::min);

    if !lowest.is_finite() {
        return Err(Error::EmptyBatch);
    }

    Ok(((lowest / 10.0).floor() as u32) * 10)
}

/// Resolve the single density shared by a whole batch.
///
/// # Example
///
/// ```
/// use photopage::{resolve_density, DensityPolicy, ImageDescriptor};
///
/// let batch = vec![
///     ImageDescriptor::new(600, 800, "a.jpg"),
///     ImageDescriptor::new(1200, 1200, "b.jpg"),
/// ];
/// // 600 px over 2 inches is the binding constraint
/// assert_eq!(resolve_density(&batch, 2.0, DensityPolicy::passport()).unwrap(), 300);
/// ```
pub fn resolve_density(
    batch: &[ImageDescriptor],
    reference_inches: f64,
    policy: DensityPolicy,
) -> Result<u32> {
    let raw = raw_density(batch, reference_inches, policy.mode)?;
    let density = policy.clamp(raw);

    log::debug!(
        "Density for {} images: raw {} dpi, {} dpi after {:?} clamp",
        batch.len(),
        raw,
        density,
        policy
    );

    if density == 0 {
        return Err(Error::InvalidConfig(format!(
            "images are too small for a {} inch reference (resolved density is 0)",
            reference_inches
        )));
    }

    Ok(density)
}

/// Convert a physical length to whole pixels at `dpi`.
pub fn inches_to_px(inches: f64, dpi: u32) -> u32 {
    (inches * dpi as f64) as u32
}

fn validate_reference(reference_inches: f64) -> Result<()> {
    if reference_inches.is_finite() && reference_inches > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "reference size must be a positive number of inches, got {}",
            reference_inches
        )))
    }
}
