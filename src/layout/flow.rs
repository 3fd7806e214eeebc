//! Greedy row-wise flow layout for variable-size thumbnails.
//!
//! Images are placed left to right with padding, wrapping to a new row when
//! the next image would cross the right edge and to a new page when it would
//! cross the bottom edge. Earlier rows are never revisited.

use super::page::{PlacementCell, SheetLayout};
use crate::error::{Error, Result};
use crate::geometry::{PageGeometry, PixelRect};
use crate::source::ImageDescriptor;

/// Default gap between thumbnails and between rows, in pixels.
pub const DEFAULT_PADDING_PX: u32 = 20;

/// Cursor of the flow layout between two placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackerState {
    /// Next free x on the current row
    pub x: u32,
    /// Top of the current row
    pub y: u32,
    /// Tallest image on the current row
    pub row_height: u32,
    /// Current page index (0-based)
    pub page: usize,
    /// Images already placed on the current page
    pub placed_on_page: usize,
}

/// Size of a thumbnail whose longer side is at most `max_dimension_px`.
///
/// Preserves aspect ratio, never upscales, truncates the derived side and
/// keeps both sides at least one pixel.
pub fn thumbnail_size(width: u32, height: u32, max_dimension_px: u32) -> (u32, u32) {
    let (w, h) = (width.max(1) as u64, height.max(1) as u64);
    let max = max_dimension_px.max(1) as u64;

    let (tw, th) = if w > h {
        let tw = w.min(max);
        (tw, tw * h / w)
    } else {
        let th = h.min(max);
        (th * w / h, th)
    };

    (tw.max(1) as u32, th.max(1) as u32)
}

/// Row-wise packer bound to one page size and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPacker {
    geometry: PageGeometry,
    padding: u32,
}

impl FlowPacker {
    /// Create a packer for `geometry` with `padding` pixels between images.
    pub fn new(geometry: PageGeometry, padding: u32) -> Self {
        Self { geometry, padding }
    }

    /// Place one `width` x `height` image, returning the advanced cursor.
    ///
    /// An image wider than the page is placed at the row start and will
    /// overflow the right edge. An image taller than the page can never be
    /// placed and is rejected.
    pub fn place(
        &self,
        state: PackerState,
        item: usize,
        width: u32,
        height: u32,
    ) -> Result<(PackerState, PlacementCell)> {
        let (page_w, page_h) = self.geometry.dimensions();

        if height > page_h {
            return Err(Error::InvalidConfig(format!(
                "image {} is {} px tall but the page is only {} px",
                item, height, page_h
            )));
        }
        if width > page_w {
            log::warn!(
                "Image {} is {} px wide and will overflow the {} px page",
                item,
                width,
                page_w
            );
        }

        let mut next = state;

        if next.x > 0 && next.x.saturating_add(width) > page_w {
            next.x = 0;
            next.y = next
                .y
                .saturating_add(next.row_height)
                .saturating_add(self.padding);
            next.row_height = 0;
        }

        if next.y.saturating_add(height) > page_h {
            log::debug!(
                "Page {} full after {} images",
                next.page + 1,
                next.placed_on_page
            );
            next = PackerState {
                page: next.page + 1,
                ..PackerState::default()
            };
        }

        let cell = PlacementCell {
            item,
            page: next.page,
            rect: PixelRect::new(next.x, next.y, width, height),
        };

        next.x = next.x.saturating_add(width).saturating_add(self.padding);
        next.row_height = next.row_height.max(height);
        next.placed_on_page += 1;

        Ok((next, cell))
    }

    /// Lay out already-sized images in order.
    pub fn pack_sizes(&self, sizes: &[(u32, u32)]) -> Result<SheetLayout> {
        let mut sheet = SheetLayout::new(self.geometry);
        let mut state = PackerState::default();

        for (item, &(width, height)) in sizes.iter().enumerate() {
            let (next, cell) = self.place(state, item, width, height)?;
            sheet.push(cell);
            state = next;
        }

        Ok(sheet)
    }

    /// Shrink each image to fit `max_dimension_px`, then lay them out.
    pub fn pack(&self, images: &[ImageDescriptor], max_dimension_px: u32) -> Result<SheetLayout> {
        if max_dimension_px == 0 {
            return Err(Error::InvalidConfig(
                "thumbnail maximum dimension is 0 px".into(),
            ));
        }

        let sizes: Vec<(u32, u32)> = images
            .iter()
            .map(|d| thumbnail_size(d.width, d.height, max_dimension_px))
            .collect();

        self.pack_sizes(&sizes)
    }
}

/// Place `images` as aspect-preserving thumbnails in padded rows.
///
/// # Example
///
/// ```
/// use photopage::{pack_flow, ImageDescriptor, PageGeometry};
///
/// let images = vec![
///     ImageDescriptor::new(100, 50, "a.png"),
///     ImageDescriptor::new(150, 80, "b.png"),
///     ImageDescriptor::new(120, 60, "c.png"),
/// ];
/// let sheet = pack_flow(&images, 1000, PageGeometry::new(300, 400), 20).unwrap();
/// let third = sheet.pages[0].cells[2].rect;
/// assert_eq!((third.x, third.y), (0, 100));
/// ```
pub fn pack_flow(
    images: &[ImageDescriptor],
    max_dimension_px: u32,
    page_geometry: PageGeometry,
    padding_px: u32,
) -> Result<SheetLayout> {
    FlowPacker::new(page_geometry, padding_px).pack(images, max_dimension_px)
}
