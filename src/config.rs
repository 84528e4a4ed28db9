//! Configuration types for the region debugger.
//!
//! Reads the same config.json the screenshot tool uses. Only the OCR score
//! regions and the OCR threshold are consumed; every other key is ignored.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in each candidate directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A rectangle in relative coordinates (0.0 to 1.0).
/// Used for defining screen regions that scale with window size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelativeRect {
    /// X position of top-left corner (0.0 = left edge, 1.0 = right edge)
    pub x: f32,
    /// Y position of top-left corner (0.0 = top edge, 1.0 = bottom edge)
    pub y: f32,
    /// Width as fraction of window width
    pub width: f32,
    /// Height as fraction of window height
    pub height: f32,
}

/// Settings consumed by the region debugger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Score regions in stage order. Order decides stage numbering and overlay colors.
    #[serde(default)]
    pub score_regions: Vec<RelativeRect>,
    /// OCR brightness threshold (pixels with R, G, B all > threshold are kept)
    #[serde(default = "default_ocr_threshold")]
    pub ocr_threshold: u8,
}

fn default_ocr_threshold() -> u8 {
    190
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            score_regions: Vec::new(),
            ocr_threshold: default_ocr_threshold(),
        }
    }
}

impl DebugConfig {
    /// Loads and parses a config file. Any read or parse failure is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Threshold to use: an explicit override wins over the configured value.
    pub fn effective_threshold(&self, override_threshold: Option<u8>) -> u8 {
        override_threshold.unwrap_or(self.ocr_threshold)
    }
}

/// Finds config.json: explicit path > project root > next to the screenshot.
///
/// An explicit path that does not exist is an error on its own; it never
/// falls through to the other candidates.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    project_root: &Path,
    screenshot: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!("Config not found: {}", path.display()));
    }

    let candidates = [
        Some(project_root.join(CONFIG_FILE_NAME)),
        screenshot.parent().map(|dir| dir.join(CONFIG_FILE_NAME)),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.exists())
        .ok_or_else(|| anyhow!("No config.json found. Use --config to specify path."))
}
