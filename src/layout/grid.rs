//! Uniform square-cell grid, centred on the page.

use super::page::{PlacementCell, SheetLayout};
use crate::error::{Error, Result};
use crate::geometry::{PageGeometry, PixelRect};
use crate::source::ImageDescriptor;

/// Grid of identical square cells.
///
/// Slots fill left-to-right, then top-to-bottom. Leftover page space is split
/// evenly into margins so the grid sits in the middle of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPacker {
    geometry: PageGeometry,
    cell: u32,
    cols: u32,
    rows: u32,
    h_margin: u32,
    v_margin: u32,
}

impl GridPacker {
    /// Build a grid of `cell` x `cell` slots on `geometry`.
    ///
    /// Fails when not even one cell fits on the page.
    pub fn new(cell: u32, geometry: PageGeometry) -> Result<Self> {
        if cell == 0 {
            return Err(Error::InvalidConfig("grid cell size is 0 px".into()));
        }

        let cols = geometry.width_px / cell;
        let rows = geometry.height_px / cell;
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidConfig(format!(
                "a {} px cell does not fit on a {}x{} px page",
                cell, geometry.width_px, geometry.height_px
            )));
        }

        let h_margin = (geometry.width_px - cols * cell) / 2;
        let v_margin = (geometry.height_px - rows * cell) / 2;

        log::debug!(
            "Grid: {}x{} cells of {} px, margins {}x{} px",
            cols,
            rows,
            cell,
            h_margin,
            v_margin
        );

        Ok(Self {
            geometry,
            cell,
            cols,
            rows,
            h_margin,
            v_margin,
        })
    }

    /// Columns per page.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Rows per page.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cells per page.
    pub fn capacity(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Side length of one cell.
    pub fn cell_size(&self) -> u32 {
        self.cell
    }

    /// Horizontal and vertical margins.
    pub fn margins(&self) -> (u32, u32) {
        (self.h_margin, self.v_margin)
    }

    /// Cell for the `index`-th image of a run.
    pub fn cell_at(&self, index: usize) -> PlacementCell {
        let capacity = self.capacity();
        let page = index / capacity;
        let slot = (index % capacity) as u32;

        let col = slot % self.cols;
        let row = slot / self.cols;

        PlacementCell {
            item: index,
            page,
            rect: PixelRect::new(
                self.h_margin + col * self.cell,
                self.v_margin + row * self.cell,
                self.cell,
                self.cell,
            ),
        }
    }

    /// Lay out `count` images.
    pub fn pack_count(&self, count: usize) -> SheetLayout {
        let mut sheet = SheetLayout::new(self.geometry);
        for index in 0..count {
            sheet.push(self.cell_at(index));
        }
        sheet
    }

    /// Lay out `images` in input order.
    pub fn pack(&self, images: &[ImageDescriptor]) -> SheetLayout {
        self.pack_count(images.len())
    }
}

/// Place `images` into a paginated grid of `cell_size_px` squares.
///
/// # Example
///
/// ```
/// use photopage::{pack_grid, ImageDescriptor, PageGeometry};
///
/// let images = vec![ImageDescriptor::new(600, 600, "a.png"); 4];
/// let sheet = pack_grid(&images, 600, PageGeometry::new(1800, 1200)).unwrap();
/// assert_eq!(sheet.page_count(), 1);
/// assert_eq!(sheet.pages[0].cells[3].rect.y, 600);
/// ```
pub fn pack_grid(
    images: &[ImageDescriptor],
    cell_size_px: u32,
    page_geometry: PageGeometry,
) -> Result<SheetLayout> {
    Ok(GridPacker::new(cell_size_px, page_geometry)?.pack(images))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_and_margins() {
        let grid = GridPacker::new(600, PageGeometry::new(2000, 1300)).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (3, 2));
        assert_eq!(grid.capacity(), 6);
        assert_eq!(grid.margins(), (100, 50));
        assert_eq!(grid.cell_at(0).rect, PixelRect::new(100, 50, 600, 600));
    }

    #[test]
    fn test_row_major_fill() {
        let grid = GridPacker::new(100, PageGeometry::new(300, 200)).unwrap();
        let positions: Vec<(u32, u32)> = (0..6)
            .map(|i| {
                let r = grid.cell_at(i).rect;
                (r.x, r.y)
            })
            .collect();
        assert_eq!(
            positions,
            vec![(0, 0), (100, 0), (200, 0), (0, 100), (100, 100), (200, 100)]
        );
    }

    #[test]
    fn test_new_page_restarts_at_first_slot() {
        let grid = GridPacker::new(100, PageGeometry::new(300, 200)).unwrap();
        let sheet = grid.pack_count(7);

        assert_eq!(sheet.page_count(), 2);
        assert_eq!(sheet.pages[0].cell_count(), 6);
        let first_on_second = sheet.pages[1].cells[0];
        assert_eq!(first_on_second.item, 6);
        assert_eq!(first_on_second.page, 1);
        assert_eq!((first_on_second.rect.x, first_on_second.rect.y), (0, 0));
    }

    #[test]
    fn test_exact_multiple_of_capacity() {
        let grid = GridPacker::new(100, PageGeometry::new(300, 200)).unwrap();
        let sheet = grid.pack_count(12);
        assert_eq!(sheet.page_count(), 2);
        assert_eq!(sheet.placed_count(), 12);
    }

    #[test]
    fn test_cells_stay_inside_page_and_do_not_overlap() {
        let page = PageGeometry::new(1275, 1650);
        let grid = GridPacker::new(300, page).unwrap();
        let sheet = grid.pack_count(grid.capacity());
        let cells: Vec<_> = sheet.cells().collect();

        for (i, a) in cells.iter().enumerate() {
            assert!(a.rect.fits_within(&page));
            for b in &cells[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect));
            }
        }
    }

    #[test]
    fn test_zero_capacity_is_error() {
        assert!(matches!(
            GridPacker::new(700, PageGeometry::new(600, 1200)),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            GridPacker::new(0, PageGeometry::new(600, 1200)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_batch_has_no_pages() {
        let sheet = pack_grid(&[], 100, PageGeometry::new(300, 300)).unwrap();
        assert_eq!(sheet.page_count(), 0);
    }
}
