//! photopage CLI - photo cropping and print sheet tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use photopage::batch::{run_passport, run_thumbnails, BatchReport, Outcome};
use photopage::{
    crop_file, AnchorSpec, CropOptions, ErrorKind, PassportOptions, ThumbnailOptions, Workspace,
};

#[derive(Debug, Parser)]
#[command(name = "photopage")]
#[command(version)]
#[command(about = "Crop photos and lay them out on passport and thumbnail print sheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crop one image to a width:height ratio
    Crop {
        /// Input image (".png" is appended when there is no extension)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Crop anchor, e.g. "l", "ru", "center", "top-left"
        #[arg(value_name = "ANCHOR", value_parser = parse_anchor)]
        anchor: AnchorSpec,

        /// Target width in inches
        #[arg(value_name = "WIDTH_IN")]
        width_in: f64,

        /// Target height in inches
        #[arg(value_name = "HEIGHT_IN")]
        height_in: f64,

        /// Output directory (next to the image if not specified)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Build passport photo sheets from a directory of photos
    Passport {
        /// Crop anchor applied to every photo
        #[arg(value_name = "ANCHOR", value_parser = parse_anchor)]
        anchor: AnchorSpec,

        /// Page width in inches
        #[arg(value_name = "PAGE_WIDTH_IN")]
        page_width_in: f64,

        /// Page height in inches
        #[arg(value_name = "PAGE_HEIGHT_IN")]
        page_height_in: f64,

        /// Directory with source photos
        #[arg(long, value_name = "DIR", env = "PHOTOPAGE_PASSPORT_INPUT", default_value = "passport/Input")]
        input_dir: PathBuf,

        /// Directory for pages and processed photos
        #[arg(long, value_name = "DIR", env = "PHOTOPAGE_PASSPORT_OUTPUT", default_value = "passport/Output")]
        output_dir: PathBuf,

        /// Printed side of each photo in inches
        #[arg(long, default_value_t = photopage::batch::DEFAULT_PHOTO_SIZE_IN)]
        photo_size: f64,

        /// Highest density to print at
        #[arg(long, default_value_t = photopage::geometry::DEFAULT_MAX_DPI)]
        max_dpi: u32,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build thumbnail contact sheets from a directory of photos
    #[command(alias = "thumbs")]
    Thumbnails {
        /// Longest printed side of a thumbnail in inches
        #[arg(value_name = "MAX_DIMENSION_IN")]
        max_dimension_in: f64,

        /// Page width in inches
        #[arg(value_name = "PAGE_WIDTH_IN")]
        page_width_in: f64,

        /// Page height in inches
        #[arg(value_name = "PAGE_HEIGHT_IN")]
        page_height_in: f64,

        /// Directory with source photos
        #[arg(long, value_name = "DIR", env = "PHOTOPAGE_THUMBNAILS_INPUT", default_value = "main/Input")]
        input_dir: PathBuf,

        /// Directory for pages and processed photos
        #[arg(long, value_name = "DIR", env = "PHOTOPAGE_THUMBNAILS_OUTPUT", default_value = "main/Output")]
        output_dir: PathBuf,

        /// Gap between thumbnails and rows in pixels
        #[arg(long, default_value_t = photopage::layout::DEFAULT_PADDING_PX)]
        padding: u32,

        /// Lowest density to print at
        #[arg(long, default_value_t = photopage::geometry::DEFAULT_MIN_DPI)]
        min_dpi: u32,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn parse_anchor(s: &str) -> Result<AnchorSpec, String> {
    AnchorSpec::parse(s).map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crop {
            image,
            anchor,
            width_in,
            height_in,
            output_dir,
        } => cmd_crop(&image, anchor, width_in, height_in, output_dir.as_deref()),
        Commands::Passport {
            anchor,
            page_width_in,
            page_height_in,
            input_dir,
            output_dir,
            photo_size,
            max_dpi,
            sequential,
            json,
        } => {
            let mut options = PassportOptions::new(page_width_in, page_height_in)
                .with_anchor(anchor)
                .with_photo_size(photo_size)
                .with_max_dpi(Some(max_dpi));
            if sequential {
                options = options.sequential();
            }
            cmd_passport(&Workspace::new(input_dir, output_dir), &options, json)
        }
        Commands::Thumbnails {
            max_dimension_in,
            page_width_in,
            page_height_in,
            input_dir,
            output_dir,
            padding,
            min_dpi,
            sequential,
            json,
        } => {
            let mut options = ThumbnailOptions::new(max_dimension_in, page_width_in, page_height_in)
                .with_padding(padding)
                .with_min_dpi(Some(min_dpi));
            if sequential {
                options = options.sequential();
            }
            cmd_thumbnails(&Workspace::new(input_dir, output_dir), &options, json)
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        // An empty input directory is not a failure
        if let Some(err) = e.downcast_ref::<photopage::Error>() {
            if err.kind() == ErrorKind::MissingInput {
                println!("{}", err.to_string().yellow());
                return;
            }
        }
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Append ".png" to a bare image name.
fn resolve_image_path(image: &Path) -> PathBuf {
    if image.extension().is_none() {
        image.with_extension("png")
    } else {
        image.to_path_buf()
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn cmd_crop(
    image: &Path,
    anchor: AnchorSpec,
    width_in: f64,
    height_in: f64,
    output_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = resolve_image_path(image);

    let mut options = CropOptions::new(width_in, height_in).with_anchor(anchor);
    if let Some(dir) = output_dir {
        options = options.with_output_dir(dir);
    }

    let report = crop_file(&input, &options)?;
    println!(
        "{} {} ({}x{} px)",
        "Saved to".green(),
        report.output.display(),
        report.rect.width(),
        report.rect.height()
    );

    Ok(())
}

fn cmd_passport(
    workspace: &Workspace,
    options: &PassportOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = spinner("Building passport sheets...")?;
    let result = run_passport(workspace, options);
    pb.finish_and_clear();

    print_report(&result?, json)
}

fn cmd_thumbnails(
    workspace: &Workspace,
    options: &ThumbnailOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = spinner("Building thumbnail sheets...")?;
    let result = run_thumbnails(workspace, options);
    pb.finish_and_clear();

    print_report(&result?, json)
}

fn print_report(report: &BatchReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("{}", "Output files:".green().bold());
    let last = report.pages.len().saturating_sub(1);
    for (i, page) in report.pages.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), page.display());
    }

    let (width, height) = report.geometry.dimensions();
    println!(
        "\n{} {} images on {} page(s), {}x{} px at {} DPI",
        "Done!".green().bold(),
        report.image_count(),
        report.page_count(),
        width,
        height,
        report.dpi
    );
    let failed: Vec<_> = report.failed_archives().collect();
    println!(
        "{} {} source files",
        "Archived".cyan(),
        report.archived.len() - failed.len()
    );
    for outcome in failed {
        if let Outcome::Failed { from, reason } = outcome {
            println!("  {} {}: {}", "Not moved".yellow(), from.display(), reason);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "photopage".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Photo cropping and print sheet tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use photopage::{HorizontalAnchor, VerticalAnchor};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_crop() {
        let cli = Cli::try_parse_from(["photopage", "crop", "portrait", "lu", "2", "3"]).unwrap();
        match cli.command {
            Commands::Crop {
                image,
                anchor,
                width_in,
                height_in,
                output_dir,
            } => {
                assert_eq!(image, PathBuf::from("portrait"));
                assert_eq!(anchor.horizontal, HorizontalAnchor::Left);
                assert_eq!(anchor.vertical, VerticalAnchor::Up);
                assert_eq!((width_in, height_in), (2.0, 3.0));
                assert!(output_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_passport_defaults() {
        let cli = Cli::try_parse_from(["photopage", "passport", "c", "6", "4"]).unwrap();
        match cli.command {
            Commands::Passport {
                photo_size,
                max_dpi,
                sequential,
                json,
                ..
            } => {
                assert_eq!(photo_size, 2.0);
                assert_eq!(max_dpi, 600);
                assert!(!sequential);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_thumbnails_flags() {
        let cli = Cli::try_parse_from([
            "photopage",
            "thumbnails",
            "3.2",
            "8.5",
            "11",
            "--padding",
            "10",
            "--min-dpi",
            "150",
            "--sequential",
        ])
        .unwrap();
        match cli.command {
            Commands::Thumbnails {
                max_dimension_in,
                padding,
                min_dpi,
                sequential,
                ..
            } => {
                assert_eq!(max_dimension_in, 3.2);
                assert_eq!(padding, 10);
                assert_eq!(min_dpi, 150);
                assert!(sequential);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_anchor_rejected() {
        assert!(Cli::try_parse_from(["photopage", "passport", "lr", "6", "4"]).is_err());
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(Cli::try_parse_from(["photopage", "crop", "portrait", "l"]).is_err());
    }

    #[test]
    fn test_resolve_image_path() {
        assert_eq!(resolve_image_path(Path::new("portrait")), PathBuf::from("portrait.png"));
        assert_eq!(resolve_image_path(Path::new("shot.jpg")), PathBuf::from("shot.jpg"));
    }
}
