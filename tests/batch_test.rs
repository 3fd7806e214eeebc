//! End-to-end tests for batch runs against a temporary workspace.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use photopage::batch::{run_passport, run_thumbnails, Outcome, PassportOptions, ThumbnailOptions, Workspace};
use photopage::render::png_density;
use photopage::{AnchorSpec, ErrorKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup() -> (TempDir, Workspace) {
    let root = TempDir::new().unwrap();
    let ws = Workspace::new(root.path().join("Input"), root.path().join("Output"));
    ws.prepare().unwrap();
    (root, ws)
}

fn write_solid(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(dir.join(name))
        .unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_passport_run_writes_tagged_page_and_moves_sources() {
    let (_root, ws) = setup();
    for (i, color) in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]].iter().enumerate() {
        write_solid(&ws.input_dir, &format!("photo{}.png", i), 600, 600, *color);
    }

    let report = run_passport(&ws, &PassportOptions::new(6.0, 4.0)).unwrap();

    assert_eq!(report.dpi, 300);
    assert_eq!(report.geometry.dimensions(), (1800, 1200));
    assert_eq!(report.page_count(), 1);
    assert_eq!(report.image_count(), 4);

    let page = &report.pages[0];
    let name = page.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("passport_collage_"));
    assert!(name.ends_with("_page1.png"));

    let bytes = fs::read(page).unwrap();
    assert_eq!(png_density(&bytes).unwrap(), Some(300));

    let canvas = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(canvas.dimensions(), (1800, 1200));
    assert_eq!(canvas.get_pixel(300, 300), &Rgb([255, 0, 0]));
    assert_eq!(canvas.get_pixel(900, 300), &Rgb([0, 255, 0]));
    assert_eq!(canvas.get_pixel(300, 900), &Rgb([9, 9, 9]));
    // Empty slot stays white
    assert_eq!(canvas.get_pixel(1500, 900), &Rgb([255, 255, 255]));

    assert!(file_names(&ws.input_dir).is_empty());
    let out = file_names(&ws.output_dir);
    for i in 0..4 {
        assert!(out.contains(&format!("photo{}.png", i)));
    }
    assert_eq!(report.archived.len(), 4);
    assert!(report
        .archived
        .iter()
        .all(|o| o.destination().and_then(Path::parent) == Some(ws.output_dir.as_path())));
    assert_eq!(report.failed_archives().count(), 0);
}

#[test]
fn test_passport_anchor_and_pagination() {
    let (_root, ws) = setup();
    // Left half red, right half blue
    let split = RgbImage::from_fn(400, 200, |x, _| {
        if x < 200 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    for i in 0..3 {
        split.save(ws.input_dir.join(format!("s{}.png", i))).unwrap();
    }

    // 200 px square crop over 1 inch -> 200 dpi, one 1x1 inch photo per page
    let options = PassportOptions::new(1.0, 1.0)
        .with_photo_size(1.0)
        .with_anchor(AnchorSpec::parse("r").unwrap())
        .sequential();
    let report = run_passport(&ws, &options).unwrap();

    assert_eq!(report.dpi, 200);
    assert_eq!(report.page_count(), 3);
    for (i, page) in report.pages.iter().enumerate() {
        assert!(page.to_string_lossy().ends_with(&format!("_page{}.png", i + 1)));
        let img = image::open(page).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(100, 100), &Rgb([0, 0, 255]));
    }
}

#[test]
fn test_thumbnail_run_flows_and_clamps_density() {
    let (_root, ws) = setup();
    write_solid(&ws.input_dir, "a.png", 200, 100, [10, 10, 10]);
    write_solid(&ws.input_dir, "b.jpg", 100, 200, [200, 200, 200]);

    // Raw density 200 is raised to the 300 dpi floor; thumbnails are not upscaled
    let report = run_thumbnails(&ws, &ThumbnailOptions::new(1.0, 1.0, 1.0)).unwrap();

    assert_eq!(report.dpi, 300);
    assert_eq!(report.geometry.dimensions(), (300, 300));
    assert_eq!(report.page_count(), 2);

    let first = &report.placements[0];
    assert_eq!(first.source, "a.png");
    assert_eq!((first.rect.width, first.rect.height), (200, 100));
    let second = &report.placements[1];
    assert_eq!(second.source, "b.jpg");
    assert_eq!(second.page, 2);

    for page in &report.pages {
        let bytes = fs::read(page).unwrap();
        assert_eq!(png_density(&bytes).unwrap(), Some(300));
        assert!(page
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("thumbnails_"));
    }
}

#[test]
fn test_thumbnail_alpha_is_flattened_onto_white() {
    let (_root, ws) = setup();
    RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 128]))
        .save(ws.input_dir.join("clear.png"))
        .unwrap();

    let options = ThumbnailOptions::new(1.0, 1.0, 1.0).with_min_dpi(None);
    let report = run_thumbnails(&ws, &options).unwrap();

    let img = image::open(&report.pages[0]).unwrap().to_rgb8();
    assert_eq!(img.get_pixel(50, 50), &Rgb([127, 127, 127]));
}

#[test]
fn test_no_images_is_missing_input() {
    let (_root, ws) = setup();
    fs::write(ws.input_dir.join("readme.txt"), "not an image").unwrap();

    let err = run_thumbnails(&ws, &ThumbnailOptions::new(3.2, 8.5, 11.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
    assert!(file_names(&ws.output_dir).is_empty());
}

#[test]
fn test_corrupt_image_aborts_without_moving() {
    let (_root, ws) = setup();
    write_solid(&ws.input_dir, "good.png", 600, 600, [1, 2, 3]);
    fs::write(ws.input_dir.join("broken.png"), b"definitely not a png").unwrap();

    let err = run_passport(&ws, &PassportOptions::new(6.0, 4.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    assert_eq!(file_names(&ws.input_dir), vec!["broken.png", "good.png"]);
    assert!(file_names(&ws.output_dir).is_empty());
}

fn write_noise(dir: &Path, name: &str, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        let h = x.wrapping_mul(2654435761) ^ y.wrapping_mul(40503).rotate_left(13);
        Rgb([h as u8, (h >> 8) as u8, (h >> 16) as u8])
    })
    .save(dir.join(name))
    .unwrap();
}

#[test]
fn test_decode_failure_mid_run_removes_written_pages() {
    let (_root, ws) = setup();
    write_noise(&ws.input_dir, "a.png", 600, 600);
    write_noise(&ws.input_dir, "b.png", 600, 600);

    // Header intact, pixel data cut short
    let path = ws.input_dir.join("b.png");
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    // One photo per page, so page 1 is written before page 2 fails
    let options = PassportOptions::new(2.0, 2.0).sequential();
    let err = run_passport(&ws, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    assert!(file_names(&ws.output_dir).is_empty());
    assert_eq!(file_names(&ws.input_dir), vec!["a.png", "b.png"]);
}

#[test]
fn test_report_serializes_outcomes() {
    let (_root, ws) = setup();
    write_solid(&ws.input_dir, "only.png", 600, 600, [0, 0, 0]);

    let report = run_passport(&ws, &PassportOptions::new(2.0, 2.0)).unwrap();
    assert!(matches!(
        report.archived[0],
        Outcome::Moved { .. } | Outcome::Copied { .. }
    ));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["kind"], "passport");
    assert_eq!(json["placements"][0]["source"], "only.png");
    assert_eq!(json["archived"][0]["action"], "moved");
}
