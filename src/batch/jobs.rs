//! The three jobs: single crop, passport sheet, thumbnail sheet.

use super::naming::{crop_file_name, page_file_name, run_timestamp, SheetKind};
use super::options::{CropOptions, PassportOptions, ThumbnailOptions};
use super::report::{BatchReport, CropReport};
use super::workspace::{WorkItem, Workspace};
use crate::error::{Error, Result};
use crate::geometry::{compute_crop, inches_to_px, resolve_density, DensityPolicy, PageGeometry};
use crate::layout::{pack_flow, pack_grid, SheetLayout};
use crate::render::{Compositor, TileMode};
use crate::source::{probe_all, ImageDescriptor, SourceImage};
use image::ImageFormat;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Crop one image to the target aspect ratio and save it as PNG.
///
/// The result is written to `cropped_{anchor}_{stem}.png` in the configured
/// output directory, or next to the source.
pub fn crop_file<P: AsRef<Path>>(path: P, options: &CropOptions) -> Result<CropReport> {
    options.validate()?;
    let path = path.as_ref();

    let descriptor = ImageDescriptor::probe(path)?;
    let source = SourceImage::open(&descriptor)?;
    let rect = compute_crop(
        descriptor.width,
        descriptor.height,
        options.aspect(),
        options.anchor,
    );
    log::debug!("Cropping {} to {:?}", descriptor.file_name(), rect);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| descriptor.file_name());
    let dir = match &options.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let output = dir.join(crop_file_name(&options.anchor, &stem));

    source
        .crop(rect)
        .save_with_format(&output, ImageFormat::Png)
        .map_err(|e| Error::Encode(e.to_string()))?;
    log::info!("Image cropped and saved as {}", output.display());

    Ok(CropReport {
        source: path.to_path_buf(),
        output,
        rect,
    })
}

/// Crop every input photo square and lay them out in a grid.
pub fn run_passport(workspace: &Workspace, options: &PassportOptions) -> Result<BatchReport> {
    options.validate()?;
    let (items, images) = load_batch(workspace, options.parallel)?;

    let policy = DensityPolicy::passport().with_ceiling(options.max_dpi);
    let dpi = resolve_density(&images, options.photo_size_in, policy)?;
    log::info!("Using {} dpi for {} passport photos", dpi, images.len());

    let cell = inches_to_px(options.photo_size_in, dpi);
    let geometry = PageGeometry::from_inches(options.page_width_in, options.page_height_in, dpi)?;
    let sheet = pack_grid(&images, cell, geometry)?;

    let compositor =
        Compositor::new(TileMode::CropToFill(options.anchor)).with_parallel(options.parallel);
    finish_batch(workspace, SheetKind::Passport, dpi, &sheet, &images, &compositor, &items)
}

/// Shrink every input photo to a thumbnail and flow them onto pages.
pub fn run_thumbnails(workspace: &Workspace, options: &ThumbnailOptions) -> Result<BatchReport> {
    options.validate()?;
    let (items, images) = load_batch(workspace, options.parallel)?;

    let policy = DensityPolicy::thumbnail().with_floor(options.min_dpi);
    let dpi = resolve_density(&images, options.max_dimension_in, policy)?;
    log::info!("Using {} dpi for {} thumbnails", dpi, images.len());

    let max_px = inches_to_px(options.max_dimension_in, dpi);
    let geometry = PageGeometry::from_inches(options.page_width_in, options.page_height_in, dpi)?;
    let sheet = pack_flow(&images, max_px, geometry, options.padding_px)?;

    let compositor = Compositor::new(TileMode::Resize).with_parallel(options.parallel);
    finish_batch(workspace, SheetKind::Thumbnails, dpi, &sheet, &images, &compositor, &items)
}

fn load_batch(workspace: &Workspace, parallel: bool) -> Result<(Vec<WorkItem>, Vec<ImageDescriptor>)> {
    workspace.prepare()?;
    let items = workspace.discover()?;
    if items.is_empty() {
        return Err(Error::NoImages(workspace.input_dir.clone()));
    }

    let paths: Vec<PathBuf> = items.iter().map(|item| item.path.clone()).collect();
    let images = probe_all(&paths, parallel)?;
    Ok((items, images))
}

fn finish_batch(
    workspace: &Workspace,
    kind: SheetKind,
    dpi: u32,
    sheet: &SheetLayout,
    images: &[ImageDescriptor],
    compositor: &Compositor,
    items: &[WorkItem],
) -> Result<BatchReport> {
    let timestamp = run_timestamp();
    let mut pages = Vec::with_capacity(sheet.pages.len());

    let rendered = compositor.render_each(sheet, images, |page, canvas| {
        let path = workspace
            .output_dir
            .join(page_file_name(kind, &timestamp, page.number));
        if let Err(e) = canvas.save(&path, dpi) {
            discard_pages(std::slice::from_ref(&path));
            return Err(e);
        }
        log::info!("Saved {} page {} as {}", kind, page.number, path.display());
        pages.push(path);
        Ok(())
    });

    // Sources stay in place on failure, so the pages go too
    if let Err(e) = rendered {
        discard_pages(&pages);
        return Err(e);
    }

    let archived = workspace.archive(items);
    let failed = archived.iter().filter(|o| o.is_failed()).count();
    if failed > 0 {
        log::warn!("{} source file(s) were left in {}", failed, workspace.input_dir.display());
    }

    let (width_px, height_px) = sheet.geometry.dimensions();
    log::info!(
        "Processed {} images on {} page(s) of {}x{} px at {} dpi",
        sheet.placed_count(),
        pages.len(),
        width_px,
        height_px,
        dpi
    );

    Ok(BatchReport::new(kind, dpi, sheet, images, pages).with_archived(archived))
}

fn discard_pages(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => log::debug!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", path.display(), e),
        }
    }
}
