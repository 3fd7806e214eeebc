//! Aspect-ratio crop computation.

use super::anchor::AnchorSpec;
use serde::{Deserialize, Serialize};

/// Crop window inside a source image, in pixel edges.
///
/// Satisfies `left < right <= width` and `upper < lower <= height` for the
/// source it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge (inclusive)
    pub left: u32,
    /// Top edge (inclusive)
    pub upper: u32,
    /// Right edge (exclusive)
    pub right: u32,
    /// Bottom edge (exclusive)
    pub lower: u32,
}

impl CropRect {
    /// Width of the window.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the window.
    pub fn height(&self) -> u32 {
        self.lower - self.upper
    }

    /// Check whether the window covers the full source.
    pub fn is_full(&self, img_w: u32, img_h: u32) -> bool {
        self.left == 0 && self.upper == 0 && self.right == img_w && self.lower == img_h
    }
}

/// Compute the largest window of `target_aspect` that fits the source,
/// positioned according to `anchor`.
///
/// A source wider than the target keeps its full height; otherwise it keeps
/// its full width. The derived extent is truncated towards zero and never
/// drops below one pixel.
///
/// # Example
///
/// ```
/// use photopage::{compute_crop, AnchorSpec};
///
/// let rect = compute_crop(1000, 500, 1.0, AnchorSpec::parse("l").unwrap());
/// assert_eq!((rect.left, rect.upper, rect.right, rect.lower), (0, 0, 500, 500));
/// ```
pub fn compute_crop(img_w: u32, img_h: u32, target_aspect: f64, anchor: AnchorSpec) -> CropRect {
    let img_w = img_w.max(1);
    let img_h = img_h.max(1);
    let img_aspect = img_w as f64 / img_h as f64;

    let (target_w, target_h) = if img_aspect > target_aspect {
        let w = (img_h as f64 * target_aspect).floor() as u32;
        (w.clamp(1, img_w), img_h)
    } else {
        let h = (img_w as f64 / target_aspect).floor() as u32;
        (img_w, h.clamp(1, img_h))
    };

    let left = anchor.horizontal.offset(img_w, target_w);
    let upper = anchor.vertical.offset(img_h, target_h);

    CropRect {
        left,
        upper,
        right: left + target_w,
        lower: upper + target_h,
    }
}
