//! Batch runs over an input directory.
//!
//! A run discovers the input images, resolves one density for all of them,
//! lays them out, writes every page and only then moves the sources into the
//! output directory.
//!
//! # Example
//!
//! ```no_run
//! use photopage::batch::{run_passport, PassportOptions, Workspace};
//! use photopage::AnchorSpec;
//!
//! fn main() -> photopage::Result<()> {
//!     let options = PassportOptions::new(6.0, 4.0).with_anchor(AnchorSpec::parse("u")?);
//!     let report = run_passport(&Workspace::passport(), &options)?;
//!     println!("{} pages at {} dpi", report.page_count(), report.dpi);
//!     Ok(())
//! }
//! ```

mod jobs;
mod naming;
mod options;
mod report;
mod workspace;

pub use jobs::{crop_file, run_passport, run_thumbnails};
pub use naming::{
    crop_file_name, format_timestamp, page_file_name, run_timestamp, SheetKind, TIMESTAMP_FORMAT,
};
pub use options::{CropOptions, PassportOptions, ThumbnailOptions, DEFAULT_PHOTO_SIZE_IN};
pub use report::{BatchReport, CropReport, PlacementRecord};
pub use workspace::{Outcome, WorkItem, Workspace};
