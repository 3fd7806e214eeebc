//! Output file names.

use crate::geometry::AnchorSpec;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `strftime` pattern shared by every page of one run.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Kind of sheet a batch run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    /// Uniform grid of square photos
    Passport,
    /// Flowing rows of thumbnails
    Thumbnails,
}

impl SheetKind {
    /// File name prefix for pages of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            SheetKind::Passport => "passport_collage",
            SheetKind::Thumbnails => "thumbnails",
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetKind::Passport => write!(f, "passport"),
            SheetKind::Thumbnails => write!(f, "thumbnails"),
        }
    }
}

/// Format `time` as a run timestamp.
pub fn format_timestamp(time: DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Timestamp for a run starting now.
pub fn run_timestamp() -> String {
    format_timestamp(Local::now())
}

/// `{prefix}_{timestamp}_page{N}.png`, `page` counting from 1.
pub fn page_file_name(kind: SheetKind, timestamp: &str, page: u32) -> String {
    format!("{}_{}_page{}.png", kind.prefix(), timestamp, page)
}

/// `cropped_{code}_{stem}.png`.
pub fn crop_file_name(anchor: &AnchorSpec, stem: &str) -> String {
    format!("cropped_{}_{}.png", anchor.code(), stem)
}
