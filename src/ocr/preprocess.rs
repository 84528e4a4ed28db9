use image::{ImageBuffer, Luma, Rgba};

use crate::config::RelativeRect;

/// Absolute pixel bounds of a region, as half-open ranges `[x0, x1)` × `[y0, y1)`.
///
/// Always satisfies `x0 <= x1 <= image_width` and `y0 <= y1 <= image_height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// True when the bounds cover no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Converts a relative rect (0.0–1.0) to absolute pixel bounds.
///
/// Fractions are scaled in `f32` and truncated with an `as u32` cast, exactly
/// like the OCR pipeline does before cropping. The cast saturates negative and
/// NaN products to 0. The origin is clamped to the image first; width and
/// height are then clamped to what remains from the clamped origin, so any
/// input produces an in-bounds (possibly empty) rectangle.
pub fn resolve_region(region: &RelativeRect, w: u32, h: u32) -> PixelBounds {
    let x0 = ((region.x * w as f32) as u32).min(w);
    let y0 = ((region.y * h as f32) as u32).min(h);
    let rw = ((region.width * w as f32) as u32).min(w - x0);
    let rh = ((region.height * h as f32) as u32).min(h - y0);

    PixelBounds {
        x0,
        y0,
        x1: x0 + rw,
        y1: y0 + rh,
    }
}

/// Converts image to binary by keeping only bright pixels.
///
/// Pixels where R > threshold AND G > threshold AND B > threshold become black (text).
/// All other pixels become white (background). Alpha is ignored.
///
/// Recommended thresholds:
/// - Screenshots (clean): 190
/// - Video frames (compressed): 160
pub fn threshold_bright_pixels(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    threshold: u8,
) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;

        let value = if r > threshold && g > threshold && b > threshold {
            0u8 // Black (text)
        } else {
            255u8 // White (background)
        };

        output.put_pixel(x, y, Luma([value]));
    }

    output
}

/// Crops a sub-region from an image using relative coordinates.
///
/// Bounds come from [`resolve_region`], so the crop always matches what the
/// overlay draws for the same region.
pub fn crop_region(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    region: &RelativeRect,
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let (w, h) = img.dimensions();
    let b = resolve_region(region, w, h);

    image::imageops::crop_imm(img, b.x0, b.y0, b.width(), b.height()).to_image()
}
