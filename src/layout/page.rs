//! Page-level layout types.

use crate::geometry::{PageGeometry, PixelRect};
use serde::{Deserialize, Serialize};

/// One image assigned to a rectangle on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCell {
    /// Index of the image in the input batch
    pub item: usize,

    /// Page index (0-based)
    pub page: usize,

    /// Where the image lands on that page
    pub rect: PixelRect,
}

/// A single output page and the cells placed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Cells in placement order
    pub cells: Vec<PlacementCell>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            cells: Vec::new(),
        }
    }

    /// Page index (0-based).
    pub fn index(&self) -> usize {
        self.number.saturating_sub(1) as usize
    }

    /// Add a cell to the page.
    pub fn add_cell(&mut self, cell: PlacementCell) {
        self.cells.push(cell);
    }

    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the number of cells on the page.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// All pages produced by one packing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Pixel size shared by every page
    pub geometry: PageGeometry,

    /// Pages in output order
    pub pages: Vec<PageLayout>,
}

impl SheetLayout {
    /// Create a layout with no pages.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
        }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PageLayout> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// Total number of placed images across all pages.
    pub fn placed_count(&self) -> usize {
        self.pages.iter().map(PageLayout::cell_count).sum()
    }

    /// Iterate over every cell in page order.
    pub fn cells(&self) -> impl Iterator<Item = &PlacementCell> {
        self.pages.iter().flat_map(|p| p.cells.iter())
    }

    /// Append `cell`, opening pages as needed.
    pub(crate) fn push(&mut self, cell: PlacementCell) {
        while self.pages.len() <= cell.page {
            let number = self.pages.len() as u32 + 1;
            self.pages.push(PageLayout::new(number));
        }
        self.pages[cell.page].add_cell(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(item: usize, page: usize) -> PlacementCell {
        PlacementCell {
            item,
            page,
            rect: PixelRect::new(0, 0, 10, 10),
        }
    }

    #[test]
    fn test_push_opens_pages() {
        let mut sheet = SheetLayout::new(PageGeometry::new(100, 100));
        sheet.push(cell(0, 0));
        sheet.push(cell(1, 0));
        sheet.push(cell(2, 1));

        assert_eq!(sheet.page_count(), 2);
        assert_eq!(sheet.placed_count(), 3);
        assert_eq!(sheet.get_page(2).unwrap().number, 2);
        assert_eq!(sheet.get_page(2).unwrap().index(), 1);
        assert!(sheet.get_page(0).is_none());
        assert!(sheet.get_page(3).is_none());
    }

    #[test]
    fn test_cells_in_order() {
        let mut sheet = SheetLayout::new(PageGeometry::new(100, 100));
        for i in 0..5 {
            sheet.push(cell(i, i / 2));
        }
        let items: Vec<usize> = sheet.cells().map(|c| c.item).collect();
        assert_eq!(items, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_page_layout_empty() {
        let page = PageLayout::new(1);
        assert!(page.is_empty());
        assert_eq!(page.cell_count(), 0);
    }
}
