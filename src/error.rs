//! Error types for photopage library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for photopage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while cropping and laying out photos.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No qualifying image files were found in the input directory.
    #[error("No image files found in {}", .0.display())]
    NoImages(PathBuf),

    /// An input image could not be read or decoded.
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode {
        /// Path of the offending file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// A page could not be encoded.
    #[error("Failed to encode page: {0}")]
    Encode(String),

    /// Density was requested for a batch with no images.
    #[error("Cannot resolve density for an empty batch")]
    EmptyBatch,

    /// The anchor string could not be turned into an anchor.
    #[error("Invalid anchor '{0}': {1}")]
    InvalidAnchor(String, String),

    /// Degenerate geometry or out-of-range arguments.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing to process; not a failure of the run itself.
    MissingInput,
    /// An input image was unreadable.
    Decode,
    /// Arguments or derived geometry cannot produce a layout.
    Configuration,
    /// Filesystem or encoder failure.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoImages(_) => ErrorKind::MissingInput,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::EmptyBatch | Error::InvalidAnchor(..) | Error::InvalidConfig(_) => {
                ErrorKind::Configuration
            }
            Error::Io(_) | Error::Encode(_) => ErrorKind::Io,
        }
    }

    /// Build a decode error for `path`.
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(e) => Error::Io(e),
            _ => Error::Encode(err.to_string()),
        }
    }
}
