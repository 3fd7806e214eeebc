//! Run reports.

use super::naming::SheetKind;
use super::workspace::Outcome;
use crate::error::{Error, Result};
use crate::geometry::{PageGeometry, PixelRect};
use crate::layout::SheetLayout;
use crate::source::ImageDescriptor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where one source image ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Source file name
    pub source: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Rectangle on that page
    pub rect: PixelRect,
}

/// Summary of a finished batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Kind of sheet produced
    pub kind: SheetKind,

    /// Density shared by every page
    pub dpi: u32,

    /// Page size in pixels
    pub geometry: PageGeometry,

    /// Written page files, in page order
    pub pages: Vec<PathBuf>,

    /// Placement of every image
    pub placements: Vec<PlacementRecord>,

    /// Fate of every source file
    pub archived: Vec<Outcome>,
}

impl BatchReport {
    /// Build a report from a rendered layout.
    pub fn new(
        kind: SheetKind,
        dpi: u32,
        sheet: &SheetLayout,
        images: &[ImageDescriptor],
        pages: Vec<PathBuf>,
    ) -> Self {
        let placements = sheet
            .cells()
            .map(|cell| PlacementRecord {
                source: images
                    .get(cell.item)
                    .map(ImageDescriptor::file_name)
                    .unwrap_or_default(),
                page: cell.page as u32 + 1,
                rect: cell.rect,
            })
            .collect();

        Self {
            kind,
            dpi,
            geometry: sheet.geometry,
            pages,
            placements,
            archived: Vec::new(),
        }
    }

    /// Attach the archive outcomes.
    pub fn with_archived(mut self, archived: Vec<Outcome>) -> Self {
        self.archived = archived;
        self
    }

    /// Number of pages written.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of images placed.
    pub fn image_count(&self) -> usize {
        self.placements.len()
    }

    /// Source files that could not be moved into the output directory.
    pub fn failed_archives(&self) -> impl Iterator<Item = &Outcome> {
        self.archived.iter().filter(|o| o.is_failed())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Encode(e.to_string()))
    }
}

/// Result of cropping a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropReport {
    /// Input file
    pub source: PathBuf,
    /// Written file
    pub output: PathBuf,
    /// Window taken from the source
    pub rect: crate::geometry::CropRect,
}
