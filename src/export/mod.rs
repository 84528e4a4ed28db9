//! Debug image export.
//!
//! Writes, for one screenshot:
//! - an untouched copy of the screenshot file
//! - the region overlay
//! - per stage, the raw crop and the thresholded crop the recognizer would see
//!
//! Output names only depend on the stage number, so re-running with the same
//! inputs overwrites every file with identical bytes.

pub mod sink;

pub use sink::{DirectorySink, OutputSink};
#[cfg(test)]
pub use sink::MemorySink;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::config::RelativeRect;
use crate::ocr::{crop_region, resolve_region, threshold_bright_pixels, PixelBounds};
use crate::overlay::{render_overlay, LabelFont};

pub const OVERLAY_FILE_NAME: &str = "regions_overlay.png";

/// `stage{n}_crop.png` for a 1-based stage number.
pub fn crop_file_name(stage: usize) -> String {
    format!("stage{}_crop.png", stage)
}

/// `stage{n}_threshold.png` for a 1-based stage number.
pub fn threshold_file_name(stage: usize) -> String {
    format!("stage{}_threshold.png", stage)
}

/// A decoded screenshot together with the exact bytes it was read from.
pub struct SourceImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    image: RgbaImage,
}

impl SourceImage {
    /// Reads and decodes a screenshot file.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read screenshot: {}", path.display()))?;
        Self::from_bytes(bytes)
            .with_context(|| format!("Failed to decode screenshot: {}", path.display()))
    }

    /// Decodes an encoded image, keeping the original bytes for the copy.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes).context("Unrecognized image format")?;
        let image = image::load_from_memory_with_format(&bytes, format)?.to_rgba8();
        Ok(Self {
            bytes,
            format,
            image,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Name of the untouched copy, e.g. `original.png`.
    pub fn copy_file_name(&self) -> String {
        let ext = self.format.extensions_str().first().copied().unwrap_or("png");
        format!("original.{}", ext)
    }
}

/// What an export produced.
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// Output names in the order they were written.
    pub written: Vec<String>,
    /// Resolved bounds per stage, in stage order.
    pub stages: Vec<PixelBounds>,
    /// 1-based stages whose region covered no pixels; they have no crop/threshold files.
    pub skipped_stages: Vec<usize>,
}

/// Writes the original copy, the overlay, and per-stage crops and thresholds.
///
/// Regions are processed in order; a region that resolves to an empty
/// rectangle is logged and skipped rather than failing the export.
pub fn export_debug_images(
    source: &SourceImage,
    regions: &[RelativeRect],
    threshold: u8,
    font: &dyn LabelFont,
    sink: &mut dyn OutputSink,
) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();
    let img = source.image();
    let (width, height) = img.dimensions();

    // Copy original screenshot for side-by-side comparison
    let copy_name = source.copy_file_name();
    save(sink, &mut summary, &copy_name, &source.bytes)?;

    let overlay = render_overlay(img, regions, font);
    let overlay_png = encode_png(DynamicImage::ImageRgba8(overlay))?;
    save(sink, &mut summary, OVERLAY_FILE_NAME, &overlay_png)?;

    for (i, region) in regions.iter().enumerate() {
        let stage = i + 1;
        let bounds = resolve_region(region, width, height);
        summary.stages.push(bounds);

        crate::log(&format!(
            "Stage {}: ({}, {}) → ({}, {})  crop={}x{}",
            stage,
            bounds.x0,
            bounds.y0,
            bounds.x1,
            bounds.y1,
            bounds.width(),
            bounds.height()
        ));

        if bounds.is_empty() {
            crate::log(&format!("  Stage {} region is empty, skipping crop", stage));
            summary.skipped_stages.push(stage);
            continue;
        }

        let cropped = crop_region(img, region);
        let thresholded = threshold_bright_pixels(&cropped, threshold);

        let crop_png = encode_png(DynamicImage::ImageRgba8(cropped))?;
        save(sink, &mut summary, &crop_file_name(stage), &crop_png)?;

        let threshold_png = encode_png(DynamicImage::ImageLuma8(thresholded))?;
        save(sink, &mut summary, &threshold_file_name(stage), &threshold_png)?;
    }

    Ok(summary)
}

fn save(
    sink: &mut dyn OutputSink,
    summary: &mut ExportSummary,
    name: &str,
    bytes: &[u8],
) -> Result<()> {
    let location = sink.write(name, bytes)?;
    crate::log(&format!("  Saved: {}", location));
    summary.written.push(name.to_string());
    Ok(())
}

fn encode_png(img: DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}
