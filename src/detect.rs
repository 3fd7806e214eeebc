//! Input image format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Image formats accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Png => f.write_str("PNG"),
            ImageKind::Jpeg => f.write_str("JPEG"),
        }
    }
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Detect the format from a file extension (case-insensitive).
///
/// # Example
/// ```
/// use photopage::detect::{detect_format_from_extension, ImageKind};
///
/// assert_eq!(detect_format_from_extension("IMG_0001.JPG"), Some(ImageKind::Jpeg));
/// assert_eq!(detect_format_from_extension("notes.txt"), None);
/// ```
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<ImageKind> {
    let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some(ImageKind::Png),
        "jpg" | "jpeg" => Some(ImageKind::Jpeg),
        _ => None,
    }
}

/// Detect the format from the leading bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImageKind> {
    if data.starts_with(PNG_MAGIC) {
        Ok(ImageKind::Png)
    } else if data.starts_with(JPEG_MAGIC) {
        Ok(ImageKind::Jpeg)
    } else {
        Err(Error::decode("<stream>", "not a PNG or JPEG stream"))
    }
}

/// Detect the format by reading the file header.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ImageKind> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 8];
    let read = reader.read(&mut header)?;
    detect_format_from_bytes(&header[..read])
        .map_err(|_| Error::decode(path, "not a PNG or JPEG file"))
}

/// Check if a path has an accepted image extension.
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_extension(path).is_some()
}
