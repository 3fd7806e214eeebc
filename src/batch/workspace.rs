//! Input/output directory pair for batch runs.

use crate::detect::is_supported_image;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Full path inside the input directory
    pub path: PathBuf,
    /// File name only
    pub file_name: String,
}

/// What happened to a source file after the pages were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    /// Renamed into the output directory
    Moved { from: PathBuf, to: PathBuf },
    /// Copied then removed (rename failed, e.g. across devices)
    Copied { from: PathBuf, to: PathBuf },
    /// Left where it was
    Failed { from: PathBuf, reason: String },
}

impl Outcome {
    /// Final location of the file, `None` if it could not be moved.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            Outcome::Moved { to, .. } | Outcome::Copied { to, .. } => Some(to),
            Outcome::Failed { .. } => None,
        }
    }

    /// Whether the move failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// An input directory drained into an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Where source images are picked up
    pub input_dir: PathBuf,
    /// Where pages are written and sources end up
    pub output_dir: PathBuf,
}

impl Workspace {
    /// Create a workspace over two directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// `passport/Input` and `passport/Output` under the current directory.
    pub fn passport() -> Self {
        Self::new(Path::new("passport").join("Input"), Path::new("passport").join("Output"))
    }

    /// `main/Input` and `main/Output` under the current directory.
    pub fn thumbnails() -> Self {
        Self::new(Path::new("main").join("Input"), Path::new("main").join("Output"))
    }

    /// Create both directories if they are missing.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.input_dir)?;
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// List supported images in the input directory, sorted by file name.
    pub fn discover(&self) -> Result<Vec<WorkItem>> {
        let mut items = Vec::new();

        for entry in fs::read_dir(&self.input_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || !is_supported_image(&path) {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            items.push(WorkItem { path, file_name });
        }

        items.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        log::debug!(
            "Found {} images in {}",
            items.len(),
            self.input_dir.display()
        );
        Ok(items)
    }

    /// Move every item into the output directory.
    ///
    /// A file that cannot be moved is recorded as [`Outcome::Failed`] and the
    /// remaining files are still moved.
    pub fn archive(&self, items: &[WorkItem]) -> Vec<Outcome> {
        items
            .iter()
            .map(|item| {
                let to = self.output_dir.join(&item.file_name);
                match move_file(&item.path, &to) {
                    Ok(outcome) => {
                        log::info!("Moved {} to {}", item.file_name, self.output_dir.display());
                        outcome
                    }
                    Err(e) => {
                        log::warn!("Could not move {}: {}", item.path.display(), e);
                        Outcome::Failed {
                            from: item.path.clone(),
                            reason: e.to_string(),
                        }
                    }
                }
            })
            .collect()
    }
}

fn move_file(from: &Path, to: &Path) -> Result<Outcome> {
    match fs::rename(from, to) {
        Ok(()) => Ok(Outcome::Moved {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        }),
        Err(e) => {
            log::debug!(
                "Rename of {} failed ({}), copying instead",
                from.display(),
                e
            );
            fs::copy(from, to)?;
            fs::remove_file(from)?;
            Ok(Outcome::Copied {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            })
        }
    }
}
