//! Fixed-size page raster with PNG serialisation.

use crate::error::{Error, Result};
use image::{imageops, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Page background.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

const METERS_PER_INCH: f64 = 0.0254;

/// An RGB page that tiles are pasted onto.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    image: RgbImage,
}

impl PageCanvas {
    /// Create a canvas filled with `background`.
    pub fn new(width_px: u32, height_px: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width_px, height_px, background),
        }
    }

    /// Create a white canvas.
    pub fn white(width_px: u32, height_px: u32) -> Self {
        Self::new(width_px, height_px, WHITE)
    }

    /// Canvas dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Overwrite the region at (x, y) with `tile`.
    ///
    /// Pixels that fall outside the canvas are dropped.
    pub fn paste(&mut self, tile: &RgbImage, x: u32, y: u32) {
        imageops::replace(&mut self.image, tile, i64::from(x), i64::from(y));
    }

    /// Encode as PNG with both axes tagged at `dpi`.
    pub fn serialize(&self, dpi: u32) -> Result<Vec<u8>> {
        let (width, height) = self.dimensions();
        let ppm = dpi_to_pixels_per_meter(dpi);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.image.as_raw())?;
            writer.finish()?;
        }

        Ok(buf)
    }

    /// Encode and write to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, dpi: u32) -> Result<()> {
        let bytes = self.serialize(dpi)?;
        fs::write(path.as_ref(), bytes)?;
        log::debug!("Wrote {} at {} dpi", path.as_ref().display(), dpi);
        Ok(())
    }
}

/// PNG stores resolution per metre.
pub fn dpi_to_pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Read the density tag back from PNG bytes, if present.
pub fn png_density(bytes: &[u8]) -> Result<Option<u32>> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder
        .read_info()
        .map_err(|e| Error::decode("<png stream>", e))?;

    Ok(reader.info().pixel_dims.and_then(|dims| match dims.unit {
        png::Unit::Meter => Some((dims.xppu as f64 * METERS_PER_INCH).round() as u32),
        png::Unit::Unspecified => None,
    }))
}
