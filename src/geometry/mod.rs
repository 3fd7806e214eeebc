//! Pure geometry: anchors, crop windows, density resolution and page sizes.

mod anchor;
mod crop;
mod density;
mod page;

pub use anchor::{AnchorSpec, HorizontalAnchor, VerticalAnchor};
pub use crop::{compute_crop, CropRect};
pub use density::{
    inches_to_px, native_dpi, raw_density, resolve_density, DensityMode, DensityPolicy,
    DEFAULT_MAX_DPI, DEFAULT_MIN_DPI,
};
pub use page::{PageGeometry, PixelRect};
