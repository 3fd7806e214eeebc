//! Image source: header probing, decoding, cropping and resampling.
//!
//! Layout code only ever sees [`ImageDescriptor`] values. Pixels are decoded
//! late, one page at a time, through [`SourceImage`].

use crate::detect::{detect_format_from_path, ImageKind};
use crate::error::{Error, Result};
use crate::geometry::CropRect;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resampling filter for every downscale.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

impl From<ImageKind> for ImageFormat {
    fn from(kind: ImageKind) -> Self {
        match kind {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Pixel dimensions of one input image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Where the pixels live
    pub path: PathBuf,
}

impl ImageDescriptor {
    /// Create a descriptor from known dimensions.
    pub fn new(width: u32, height: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            width,
            height,
            path: path.into(),
        }
    }

    /// Read the dimensions from the file header without decoding pixels.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let kind = detect_format_from_path(path)?;

        let mut reader = ImageReader::open(path)?;
        reader.set_format(kind.into());
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| Error::decode(path, e))?;

        if width == 0 || height == 0 {
            return Err(Error::decode(path, "image has zero width or height"));
        }

        Ok(Self::new(width, height, path))
    }

    /// Width / height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// File name for messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Probe every path, stopping at the first unreadable image.
pub fn probe_all(paths: &[PathBuf], parallel: bool) -> Result<Vec<ImageDescriptor>> {
    if parallel {
        paths.par_iter().map(ImageDescriptor::probe).collect()
    } else {
        paths.iter().map(ImageDescriptor::probe).collect()
    }
}

/// A decoded input image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    descriptor: ImageDescriptor,
    image: DynamicImage,
}

impl SourceImage {
    /// Decode the image behind `descriptor`.
    pub fn open(descriptor: &ImageDescriptor) -> Result<Self> {
        let path = &descriptor.path;
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| Error::decode(path, e))?;

        if (image.width(), image.height()) != descriptor.dimensions() {
            return Err(Error::decode(
                path,
                format!(
                    "decoded {}x{} but header reported {}x{}",
                    image.width(),
                    image.height(),
                    descriptor.width,
                    descriptor.height
                ),
            ));
        }

        Ok(Self {
            descriptor: descriptor.clone(),
            image,
        })
    }

    /// Wrap pixels that are already in memory.
    pub fn from_image(image: DynamicImage, path: impl Into<PathBuf>) -> Self {
        let descriptor = ImageDescriptor::new(image.width(), image.height(), path);
        Self { descriptor, image }
    }

    /// Dimensions and origin.
    pub fn descriptor(&self) -> &ImageDescriptor {
        &self.descriptor
    }

    /// Decoded pixels.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Copy out the window described by `rect`.
    pub fn crop(&self, rect: CropRect) -> DynamicImage {
        self.image
            .crop_imm(rect.left, rect.upper, rect.width(), rect.height())
    }
}

/// Resize to exactly `width` x `height`.
///
/// Returns a plain copy when the size already matches.
pub fn resize_exact(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    image.resize_exact(width, height, RESAMPLE_FILTER)
}

/// Flatten any alpha channel by compositing onto white.
pub fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    rgb
}
