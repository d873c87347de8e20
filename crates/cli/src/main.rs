//! CLI tool for turning a folder of images into PowerPoint slides.

use anyhow::{Context, Result};
use clap::Parser;
use imgdeck_core::DeckOptions;
use imgdeck_pptx::{create_slides, DeckReport};
use std::path::PathBuf;

/// Add one full-width slide per image to a new or existing PowerPoint deck.
#[derive(Parser, Debug)]
#[command(name = "imgdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder containing the images
    folder: PathBuf,

    /// PowerPoint file to create, or to copy and extend if it exists
    pptx: PathBuf,

    /// JSON file with deck options; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Slide height in inches for a new deck (default: 7.5)
    #[arg(long)]
    height: Option<f64>,

    /// Slide width in inches for a new deck (default: 13.333)
    #[arg(long)]
    width: Option<f64>,

    /// Image extension to include; repeat for several (default: .png .jpg .tif)
    #[arg(short, long = "ext")]
    ext: Vec<String>,

    /// Suffix for the output file when extending an existing deck (default: _edit)
    #[arg(short, long)]
    suffix: Option<String>,

    /// Add images in file-name order instead of directory order
    #[arg(long)]
    sort: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let options = build_options(&args)?;
    log::debug!("Deck options: {:?}", options);

    let report = create_slides(&args.folder, &args.pptx, &options).with_context(|| {
        format!(
            "Failed to add images from {} to {}",
            args.folder.display(),
            args.pptx.display()
        )
    })?;

    if let Some(report) = report {
        print_report(&report, args.json)?;
    }

    Ok(())
}

/// Options from the config file (or defaults) with command-line overrides applied.
fn build_options(args: &Args) -> Result<DeckOptions> {
    let mut options = match &args.config {
        Some(path) => DeckOptions::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DeckOptions::default(),
    };

    if let Some(height) = args.height {
        options.slide_height_inch = height;
    }
    if let Some(width) = args.width {
        options.slide_width_inch = width;
    }
    if !args.ext.is_empty() {
        options = options.with_extensions(args.ext.iter().cloned());
    }
    if let Some(suffix) = &args.suffix {
        options = options.with_suffix(suffix.clone());
    }
    if args.sort {
        options = options.with_sort(true);
    }

    options.validate().context("Invalid deck options")?;
    Ok(options)
}

fn print_report(report: &DeckReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", text);
    } else {
        println!("{}", report.output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "imgdeck", "imgs", "out.pptx", "--width", "10", "--ext", "png", "--ext", ".JPEG",
            "--sort",
        ]);
        let options = build_options(&args).expect("options");
        assert_eq!(options.slide_width_inch, 10.0);
        assert_eq!(options.slide_height_inch, 7.5);
        assert_eq!(options.extensions, vec!["png".to_string(), ".JPEG".to_string()]);
        assert!(options.sort);
        assert_eq!(options.suffix, "_edit");
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = dir.path().join("deck.json");
        std::fs::write(&config, r#"{ "suffix": "_v2", "slide_height_inch": 9.0 }"#)
            .expect("write config");

        let args = Args::parse_from([
            "imgdeck",
            "imgs",
            "out.pptx",
            "--config",
            config.to_str().expect("utf-8 path"),
            "--height",
            "6",
        ]);
        let options = build_options(&args).expect("options");
        assert_eq!(options.suffix, "_v2");
        assert_eq!(options.slide_height_inch, 6.0);
    }

    #[test]
    fn test_rejects_empty_suffix() {
        let args = Args::parse_from(["imgdeck", "imgs", "out.pptx", "--suffix", ""]);
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn test_rejects_bad_suffix() {
        let args = Args::parse_from(["imgdeck", "imgs", "out.pptx", "--suffix", "a/b"]);
        assert!(build_options(&args).is_err());
    }
}
