//! OCR preprocessing mirrored from the recognition pipeline.
//!
//! Region resolution and thresholding must stay bit-exact with what the
//! pipeline feeds to the recognizer, otherwise the debug images lie.

pub mod preprocess;

pub use preprocess::{crop_region, resolve_region, threshold_bright_pixels, PixelBounds};
