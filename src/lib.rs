//! # photopage
//!
//! Crop photos with directional anchors and pack them onto print pages.
//!
//! The library resolves one shared resolution (DPI) for a whole batch so that
//! no image is upscaled, then lays images out on fixed-size pages and writes
//! each page as a PNG tagged with that resolution.
//!
//! ## Quick Start
//!
//! ```
//! use photopage::{compute_crop, AnchorSpec, HorizontalAnchor, VerticalAnchor};
//!
//! // Square crop of a landscape photo, keeping the left edge
//! let anchor = AnchorSpec::new(HorizontalAnchor::Left, VerticalAnchor::Center);
//! let rect = compute_crop(1200, 800, 1.0, anchor);
//! assert_eq!((rect.left, rect.right), (0, 800));
//! ```
//!
//! ```
//! use photopage::{pack_grid, resolve_density, DensityPolicy, ImageDescriptor, PageGeometry};
//!
//! let batch = vec![ImageDescriptor::new(600, 600, "a.jpg"); 4];
//! let dpi = resolve_density(&batch, 2.0, DensityPolicy::passport()).unwrap();
//! let page = PageGeometry::from_inches(6.0, 4.0, dpi).unwrap();
//! let sheet = pack_grid(&batch, 2 * dpi, page).unwrap();
//! assert_eq!(sheet.page_count(), 1);
//! ```
//!
//! ## Features
//!
//! - **Anchored cropping**: left/right/up/down/center crop windows
//! - **Density inference**: one DPI per batch, never upscaling
//! - **Grid layout**: uniform square passport photos, centred and paginated
//! - **Flow layout**: aspect-preserving thumbnails in padded rows
//! - **Print-ready output**: RGB PNG pages with an embedded `pHYs` density
//! - **Parallel processing**: Uses Rayon for probing and tile preparation

pub mod batch;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{
    crop_file, run_passport, run_thumbnails, BatchReport, CropOptions, PassportOptions,
    ThumbnailOptions, Workspace,
};
pub use error::{Error, ErrorKind, Result};
pub use geometry::{
    compute_crop, inches_to_px, native_dpi, resolve_density, AnchorSpec, CropRect, DensityMode,
    DensityPolicy, HorizontalAnchor, PageGeometry, PixelRect, VerticalAnchor,
};
pub use layout::{
    pack_flow, pack_grid, thumbnail_size, FlowPacker, GridPacker, PackerState, PageLayout,
    PlacementCell, SheetLayout,
};
pub use render::{Compositor, PageCanvas, TileMode};
pub use source::{ImageDescriptor, SourceImage};
