//! Region overlay rendering.
//!
//! Paints every configured score region onto a transparent layer (fill,
//! border, two-line label) and composites the layer over a copy of the
//! screenshot, so pixels outside the painted areas are left untouched.

pub mod draw;
pub mod font;

pub use font::{load_default_label_font, LabelFont};

use image::{Rgba, RgbaImage};

use crate::config::RelativeRect;
use crate::ocr::{resolve_region, PixelBounds};

/// Semi-transparent fill per stage, cycled by stage index.
pub const STAGE_COLORS: [Rgba<u8>; 3] = [
    Rgba([255, 0, 0, 80]), // Red
    Rgba([0, 255, 0, 80]), // Green
    Rgba([0, 0, 255, 80]), // Blue
];

/// Opaque border/label color per stage.
pub const STAGE_BORDER_COLORS: [Rgba<u8>; 3] = [
    Rgba([255, 0, 0, 255]),
    Rgba([0, 255, 0, 255]),
    Rgba([0, 0, 255, 255]),
];

/// Coordinate line color.
pub const COORDS_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 220]);

pub const BORDER_THICKNESS: u32 = 2;
pub const STAGE_LABEL_SIZE: f32 = 20.0;
pub const COORDS_LABEL_SIZE: f32 = 14.0;

/// Returns (fill, border) colors for a 0-based stage index.
pub fn stage_colors(index: usize) -> (Rgba<u8>, Rgba<u8>) {
    (
        STAGE_COLORS[index % STAGE_COLORS.len()],
        STAGE_BORDER_COLORS[index % STAGE_BORDER_COLORS.len()],
    )
}

/// Top-left of the stage label: above the rectangle when there is room, below otherwise.
pub fn label_origin(bounds: &PixelBounds) -> (i32, i32) {
    let x = bounds.x0 as i32 + 4;
    let y = if bounds.y0 > 30 {
        bounds.y0 as i32 - 24
    } else {
        bounds.y1 as i32 + 4
    };
    (x, y)
}

/// Coordinate line shown under the stage label, e.g. `(100, 50) → (400, 150)  [300x100]`.
pub fn format_coords(bounds: &PixelBounds) -> String {
    format!(
        "({}, {}) → ({}, {})  [{}x{}]",
        bounds.x0,
        bounds.y0,
        bounds.x1,
        bounds.y1,
        bounds.width(),
        bounds.height()
    )
}

/// Renders all regions over a copy of the screenshot.
///
/// The result has the screenshot's dimensions. Regions are painted in order,
/// so later stages cover earlier ones where they overlap.
pub fn render_overlay(
    screenshot: &RgbaImage,
    regions: &[RelativeRect],
    font: &dyn LabelFont,
) -> RgbaImage {
    let mut overlay = screenshot.clone();
    let (width, height) = overlay.dimensions();

    // Everything is drawn on a transparent layer first
    let mut layer = RgbaImage::new(width, height);

    for (i, region) in regions.iter().enumerate() {
        let bounds = resolve_region(region, width, height);
        let (fill, border) = stage_colors(i);

        draw::fill_rect(&mut layer, &bounds, fill);
        draw::draw_rect(&mut layer, &bounds, border, BORDER_THICKNESS);

        let (label_x, label_y) = label_origin(&bounds);
        let label = format!("Stage {}", i + 1);
        font.draw(&mut layer, label_x, label_y, STAGE_LABEL_SIZE, border, &label);
        font.draw(
            &mut layer,
            label_x,
            label_y + 22,
            COORDS_LABEL_SIZE,
            COORDS_TEXT_COLOR,
            &format_coords(&bounds),
        );
    }

    // Transparent layer pixels leave the screenshot untouched
    image::imageops::overlay(&mut overlay, &layer, 0, 0);
    overlay
}
