//! OCR Region Debugger
//!
//! Renders the score regions from config.json onto a screenshot and writes
//! the crops and thresholded images exactly as the OCR pipeline sees them,
//! so misaligned regions can be spotted without running recognition.

mod config;
mod export;
mod ocr;
mod overlay;
mod paths;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use config::DebugConfig;
use export::{DirectorySink, SourceImage};

/// Debug OCR crop regions on screenshots.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to screenshot PNG
    screenshot: PathBuf,

    /// Path to config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Brightness threshold override (0-255)
    #[arg(long)]
    threshold: Option<u8>,

    /// Output directory (defaults to `debug/` next to the executable)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("ocr_region_debug.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging to file is best effort
    let _ = paths::ensure_directories();

    run(args).inspect_err(|e| log(&format!("Error: {:#}", e)))
}

fn run(args: Args) -> Result<()> {
    if !args.screenshot.exists() {
        return Err(anyhow!(
            "Screenshot not found: {}",
            args.screenshot.display()
        ));
    }
    let screenshot_path = args
        .screenshot
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", args.screenshot.display()))?;

    let config_path = config::resolve_config_path(
        args.config.as_deref(),
        paths::get_exe_dir(),
        &screenshot_path,
    )?;
    let config = DebugConfig::load(&config_path)?;
    log(&format!("Config: {}", config_path.display()));

    if config.score_regions.is_empty() {
        return Err(anyhow!("No score_regions in config"));
    }

    let threshold = config.effective_threshold(args.threshold);
    log(&format!("Threshold: {}", threshold));

    let source = SourceImage::open(&screenshot_path)?;
    let (width, height) = source.dimensions();
    log(&format!("Screenshot: {}x{}", width, height));

    let output_dir = args.output.unwrap_or_else(paths::get_debug_dir);
    let mut sink = DirectorySink::create(&output_dir)?;
    log(&format!("Output: {}", sink.dir().display()));

    let font = overlay::load_default_label_font();
    let summary = export::export_debug_images(
        &source,
        &config.score_regions,
        threshold,
        font.as_ref(),
        &mut sink,
    )?;

    if !summary.skipped_stages.is_empty() {
        log(&format!(
            "Empty regions (no crop written) for stages: {:?}",
            summary.skipped_stages
        ));
    }
    log(&format!(
        "Done. {} images written for {} stages to {}",
        summary.written.len(),
        summary.stages.len(),
        sink.dir().display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_screenshot(path: &std::path::Path) {
        let img = image::RgbaImage::from_fn(100, 50, |x, y| {
            image::Rgba([(x * 2) as u8, (y * 5) as u8, 200, 255])
        });
        img.save(path).unwrap();
    }

    fn args(screenshot: PathBuf, config: Option<PathBuf>, output: PathBuf) -> Args {
        Args {
            screenshot,
            config,
            threshold: None,
            output: Some(output),
        }
    }

    #[test]
    fn test_cli_parsing() {
        let parsed = Args::try_parse_from([
            "ocr-region-debug",
            "shot.png",
            "--config",
            "cfg.json",
            "--threshold",
            "160",
        ])
        .unwrap();
        assert_eq!(parsed.screenshot, PathBuf::from("shot.png"));
        assert_eq!(parsed.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(parsed.threshold, Some(160));
        assert_eq!(parsed.output, None);

        let out_of_range = ["ocr-region-debug", "shot.png", "--threshold", "256"];
        assert!(Args::try_parse_from(out_of_range).is_err());
        assert!(Args::try_parse_from(["ocr-region-debug"]).is_err());
    }

    #[test]
    fn test_run_writes_all_outputs() {
        let dir = tempdir().unwrap();
        let shot = dir.path().join("shot.png");
        write_screenshot(&shot);
        let config = dir.path().join("config.json");
        fs::write(
            &config,
            r#"{"score_regions": [
                {"x": 0.1, "y": 0.1, "width": 0.3, "height": 0.2},
                {"x": 0.5, "y": 0.5, "width": 0.3, "height": 0.2}
            ], "ocr_threshold": 150}"#,
        )
        .unwrap();
        let out = dir.path().join("debug");

        run(args(shot, Some(config), out.clone())).unwrap();

        for name in [
            "original.png",
            "regions_overlay.png",
            "stage1_crop.png",
            "stage1_threshold.png",
            "stage2_crop.png",
            "stage2_threshold.png",
        ] {
            assert!(out.join(name).is_file(), "missing {}", name);
        }
        assert_eq!(fs::read_dir(&out).unwrap().count(), 6);
    }

    #[test]
    fn test_run_threshold_override_reaches_outputs() {
        let dir = tempdir().unwrap();
        let shot = dir.path().join("shot.png");
        image::RgbaImage::from_pixel(20, 10, image::Rgba([200, 200, 200, 255]))
            .save(&shot)
            .unwrap();
        let config = dir.path().join("config.json");
        fs::write(
            &config,
            r#"{"score_regions": [{"x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0}],
                "ocr_threshold": 190}"#,
        )
        .unwrap();

        let read_threshold = |out: &std::path::Path| {
            image::open(out.join("stage1_threshold.png")).unwrap().to_luma8()
        };

        // Configured 190: 200 > 190, so every pixel is text (black)
        let from_config = dir.path().join("from_config");
        run(args(shot.clone(), Some(config.clone()), from_config.clone())).unwrap();
        assert!(read_threshold(&from_config).pixels().all(|p| p[0] == 0));

        // Override 200: 200 is not > 200, so every pixel is background (white)
        let overridden = dir.path().join("overridden");
        let mut with_override = args(shot, Some(config), overridden.clone());
        with_override.threshold = Some(200);
        run(with_override).unwrap();
        assert!(read_threshold(&overridden).pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_run_missing_screenshot() {
        let dir = tempdir().unwrap();
        let err = run(args(dir.path().join("nope.png"), None, dir.path().join("debug")))
            .unwrap_err();
        assert!(err.to_string().starts_with("Screenshot not found"));
    }

    #[test]
    fn test_run_empty_regions() {
        let dir = tempdir().unwrap();
        let shot = dir.path().join("shot.png");
        write_screenshot(&shot);
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"score_regions": []}"#).unwrap();
        let out = dir.path().join("debug");

        let err = run(args(shot, Some(config), out.clone())).unwrap_err();
        assert_eq!(err.to_string(), "No score_regions in config");
        assert!(!out.exists(), "nothing should be written");
    }
}
