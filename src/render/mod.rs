//! Rendering module for turning layouts into print-ready pages.

mod canvas;
mod compose;

pub use canvas::{dpi_to_pixels_per_meter, png_density, PageCanvas, WHITE};
pub use compose::{prepare_tile, tile_from_source, Compositor, TileMode};
