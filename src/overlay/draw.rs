//! Rectangle drawing on the overlay layer.
//!
//! Pixels are replaced, not blended: the layer is composited onto the
//! screenshot afterwards, so whatever is drawn last on the layer wins.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::ocr::PixelBounds;

/// Fills the pixels covered by `bounds` with `color`. Empty bounds draw nothing.
pub fn fill_rect(img: &mut RgbaImage, bounds: &PixelBounds, color: Rgba<u8>) {
    if bounds.is_empty() {
        return;
    }
    let rect =
        Rect::at(bounds.x0 as i32, bounds.y0 as i32).of_size(bounds.width(), bounds.height());
    draw_filled_rect_mut(img, rect, color);
}

/// Draws a border of `thickness` pixels just inside `bounds`.
///
/// Bounds thinner than twice the thickness end up completely filled.
pub fn draw_rect(img: &mut RgbaImage, bounds: &PixelBounds, color: Rgba<u8>, thickness: u32) {
    let (img_w, img_h) = img.dimensions();
    let x1 = bounds.x1.min(img_w);
    let y1 = bounds.y1.min(img_h);

    for py in bounds.y0..y1 {
        let on_horizontal_edge = py - bounds.y0 < thickness || bounds.y1 - 1 - py < thickness;
        for px in bounds.x0..x1 {
            let on_vertical_edge = px - bounds.x0 < thickness || bounds.x1 - 1 - px < thickness;
            if on_horizontal_edge || on_vertical_edge {
                img.put_pixel(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn bounds(x0: u32, y0: u32, x1: u32, y1: u32) -> PixelBounds {
        PixelBounds { x0, y0, x1, y1 }
    }

    #[test]
    fn test_draw_rect() {
        let mut img = RgbaImage::new(100, 100);
        draw_rect(&mut img, &bounds(10, 10, 60, 40), GREEN, 2);

        // Corners and both border rows are painted
        assert_eq!(*img.get_pixel(10, 10), GREEN);
        assert_eq!(*img.get_pixel(11, 11), GREEN);
        assert_eq!(*img.get_pixel(59, 39), GREEN);
        assert_eq!(*img.get_pixel(58, 38), GREEN);
        // Third pixel in is untouched
        assert_eq!(*img.get_pixel(12, 20), CLEAR);
        // Center is untouched
        assert_eq!(*img.get_pixel(35, 25), CLEAR);
        // Nothing outside the bounds
        assert_eq!(*img.get_pixel(9, 10), CLEAR);
        assert_eq!(*img.get_pixel(60, 39), CLEAR);
        assert_eq!(*img.get_pixel(30, 40), CLEAR);
    }

    #[test]
    fn test_draw_rect_thin_bounds_fill_completely() {
        let mut img = RgbaImage::new(10, 10);
        draw_rect(&mut img, &bounds(0, 0, 3, 1), GREEN, 2);

        for x in 0..3 {
            assert_eq!(*img.get_pixel(x, 0), GREEN);
        }
        assert_eq!(*img.get_pixel(3, 0), CLEAR);
        assert_eq!(*img.get_pixel(0, 1), CLEAR);
    }

    #[test]
    fn test_draw_rect_empty_bounds() {
        let mut img = RgbaImage::new(10, 10);
        draw_rect(&mut img, &bounds(10, 5, 10, 9), GREEN, 2);
        draw_rect(&mut img, &bounds(2, 5, 8, 5), GREEN, 2);
        assert!(img.pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn test_fill_rect_covers_exact_bounds() {
        let mut img = RgbaImage::new(20, 20);
        let red = Rgba([255, 0, 0, 80]);
        fill_rect(&mut img, &bounds(5, 6, 9, 8), red);

        for (x, y, p) in img.enumerate_pixels() {
            let inside = (5..9).contains(&x) && (6..8).contains(&y);
            assert_eq!(*p == red, inside, "unexpected pixel at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_fill_rect_empty_bounds() {
        let mut img = RgbaImage::new(4, 4);
        fill_rect(&mut img, &bounds(4, 0, 4, 4), GREEN);
        assert!(img.pixels().all(|p| *p == CLEAR));
    }
}
