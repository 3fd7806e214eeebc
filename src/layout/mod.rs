//! Page layout: where each image lands on which page.
//!
//! Packers work on pixel dimensions only and never touch image data. Their
//! output, a [`SheetLayout`], is consumed by the renderer.

mod flow;
mod grid;
mod page;

pub use flow::{pack_flow, thumbnail_size, FlowPacker, PackerState, DEFAULT_PADDING_PX};
pub use grid::{pack_grid, GridPacker};
pub use page::{PageLayout, PlacementCell, SheetLayout};
