//! Label text rendering.
//!
//! Fonts are looked up by name in the platform font folders. The first
//! candidate that loads wins; if none does, a built-in block font is used so
//! labels still show up. Nothing downstream depends on which one was picked.

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::fs;
use std::path::{Path, PathBuf};

/// Font file names tried in order.
pub const FONT_CANDIDATES: [&str; 4] = ["arial.ttf", "Arial.ttf", "DejaVuSans.ttf", "segoeui.ttf"];

/// Something that can put a line of text on an RGBA canvas.
pub trait LabelFont {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Draws `text` with its top-left corner at (`x`, `y`). Off-canvas parts are clipped.
    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str);
}

/// A TrueType/OpenType font loaded from disk.
pub struct TrueTypeFont {
    name: String,
    font: FontVec,
}

impl TrueTypeFont {
    /// Loads a font file. Returns `None` if it is missing or not a valid font.
    pub fn load(path: &Path) -> Option<Self> {
        let data = fs::read(path).ok()?;
        let font = FontVec::try_from_vec(data).ok()?;
        Some(Self {
            name: path.display().to_string(),
            font,
        })
    }
}

impl LabelFont for TrueTypeFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str) {
        draw_text_mut(canvas, color, x, y, PxScale::from(size), &self.font, text);
    }
}

/// Built-in fallback: one solid cell per visible character.
pub struct BlockFont;

impl LabelFont for BlockFont {
    fn name(&self) -> &str {
        "built-in block font"
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, size: f32, color: Rgba<u8>, text: &str) {
        let advance = (size * 0.6).round().max(2.0) as i32;
        let cell_w = (advance - 1) as u32;
        let cell_h = (size * 0.7).round().max(1.0) as u32;
        let top = y + (size * 0.15).round() as i32;

        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let left = x + i as i32 * advance;
            draw_filled_rect_mut(canvas, Rect::at(left, top).of_size(cell_w, cell_h), color);
        }
    }
}

/// Directories searched for label fonts, most specific first.
pub fn font_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Some(dir) = dirs::font_dir() {
        search.push(dir);
    }
    if let Ok(windir) = std::env::var("WINDIR") {
        search.push(Path::new(&windir).join("Fonts"));
    }
    for dir in [
        "/usr/share/fonts/truetype/dejavu",
        "/usr/share/fonts/truetype/msttcorefonts",
        "/usr/share/fonts/TTF",
        "/usr/share/fonts/dejavu",
        "/Library/Fonts",
        "/System/Library/Fonts/Supplemental",
    ] {
        search.push(PathBuf::from(dir));
    }
    search
}

/// Returns the first candidate font that loads, or the block font.
///
/// Each name is tried as given (relative to the working directory) and then
/// in every search directory before moving on to the next name.
pub fn load_label_font(names: &[&str], search_dirs: &[PathBuf]) -> Box<dyn LabelFont> {
    for name in names {
        let paths = std::iter::once(PathBuf::from(name))
            .chain(search_dirs.iter().map(|dir| dir.join(name)));
        for path in paths {
            if let Some(font) = TrueTypeFont::load(&path) {
                return Box::new(font);
            }
        }
    }
    Box::new(BlockFont)
}

/// Loads a label font from the default candidates and system folders.
pub fn load_default_label_font() -> Box<dyn LabelFont> {
    let font = load_label_font(&FONT_CANDIDATES, &font_search_dirs());
    crate::log(&format!("Label font: {}", font.name()));
    font
}
