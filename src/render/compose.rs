//! Turning page layouts into finished canvases.

use super::canvas::PageCanvas;
use crate::error::{Error, Result};
use crate::geometry::{compute_crop, AnchorSpec, PixelRect};
use crate::layout::{PageLayout, PlacementCell, SheetLayout};
use crate::source::{flatten_alpha, resize_exact, ImageDescriptor, SourceImage};
use image::RgbImage;
use rayon::prelude::*;

/// How a source image becomes the pixels of its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMode {
    /// Crop to the cell's aspect ratio at the anchor, then resize to the cell.
    CropToFill(AnchorSpec),
    /// Resize the whole image to the cell. The cell is expected to already
    /// carry the image's aspect ratio.
    Resize,
}

/// Decode, crop and resize one image for `rect`.
pub fn prepare_tile(descriptor: &ImageDescriptor, rect: PixelRect, mode: TileMode) -> Result<RgbImage> {
    let source = SourceImage::open(descriptor)?;
    Ok(tile_from_source(&source, rect, mode))
}

/// Crop and resize already-decoded pixels for `rect`.
pub fn tile_from_source(source: &SourceImage, rect: PixelRect, mode: TileMode) -> RgbImage {
    let resized = match mode {
        TileMode::CropToFill(anchor) => {
            let (w, h) = source.descriptor().dimensions();
            let aspect = rect.width as f64 / rect.height as f64;
            let crop = compute_crop(w, h, aspect, anchor);
            resize_exact(&source.crop(crop), rect.width, rect.height)
        }
        TileMode::Resize => resize_exact(source.image(), rect.width, rect.height),
    };
    flatten_alpha(&resized)
}

/// Renders the pages of a [`SheetLayout`].
///
/// Tiles of one page are prepared independently (in parallel unless
/// disabled) and then pasted onto the page canvas one by one.
#[derive(Debug, Clone)]
pub struct Compositor {
    mode: TileMode,
    parallel: bool,
}

impl Compositor {
    /// Create a compositor using `mode` on a white background.
    pub fn new(mode: TileMode) -> Self {
        Self {
            mode,
            parallel: true,
        }
    }

    /// Enable or disable parallel tile preparation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Render one page of `sheet`.
    pub fn render_page(
        &self,
        sheet: &SheetLayout,
        page: &PageLayout,
        images: &[ImageDescriptor],
    ) -> Result<PageCanvas> {
        let prepare = |cell: &PlacementCell| -> Result<RgbImage> {
            let descriptor = images.get(cell.item).ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "layout references image {} but the batch has {}",
                    cell.item,
                    images.len()
                ))
            })?;
            prepare_tile(descriptor, cell.rect, self.mode)
        };

        let tiles: Vec<RgbImage> = if self.parallel {
            page.cells.par_iter().map(prepare).collect::<Result<_>>()?
        } else {
            page.cells.iter().map(prepare).collect::<Result<_>>()?
        };

        let (width, height) = sheet.geometry.dimensions();
        let mut canvas = PageCanvas::white(width, height);
        for (cell, tile) in page.cells.iter().zip(&tiles) {
            canvas.paste(tile, cell.rect.x, cell.rect.y);
        }

        log::debug!(
            "Rendered page {} with {} images",
            page.number,
            page.cells.len()
        );
        Ok(canvas)
    }

    /// Render every page in order, handing each finished canvas to `on_page`.
    ///
    /// Only one page canvas is alive at a time.
    pub fn render_each<F>(
        &self,
        sheet: &SheetLayout,
        images: &[ImageDescriptor],
        mut on_page: F,
    ) -> Result<()>
    where
        F: FnMut(&PageLayout, PageCanvas) -> Result<()>,
    {
        for page in &sheet.pages {
            let canvas = self.render_page(sheet, page, images)?;
            on_page(page, canvas)?;
        }
        Ok(())
    }
}
