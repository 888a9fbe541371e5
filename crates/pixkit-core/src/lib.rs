//! pixkit Core - Basic data structures for raster processing
//!
//! This crate provides the fundamental data structures used throughout
//! the pixkit workspace:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - Packed BGRA raster (immutable / mutable)
//! - [`Rgb`] - Color triple used by palettes and clustering
//! - [`Error`] / [`ErrorKind`] - Error type and the workspace-wide error taxonomy

pub mod buffer;
pub mod error;
pub mod rgb;

pub use buffer::{PixelBuffer, PixelBufferMut};
pub use error::{Error, ErrorKind, Result};
pub use rgb::Rgb;

/// Channel layout and helper functions for packed BGRA pixels.
///
/// # Pixel format
///
/// Each pixel occupies four bytes in the order blue, green, red, alpha.
/// Rows are tightly packed: `stride = width * 4`.
pub mod color {
    /// Blue channel offset within a pixel
    pub const BLUE: usize = 0;
    /// Green channel offset within a pixel
    pub const GREEN: usize = 1;
    /// Red channel offset within a pixel
    pub const RED: usize = 2;
    /// Alpha channel offset within a pixel
    pub const ALPHA: usize = 3;

    /// Bytes per pixel
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Rec. 601 luma weights (red, green, blue)
    pub const LUMA_WEIGHTS: (f64, f64, f64) = (0.299, 0.587, 0.114);

    /// Luma as an unrounded floating-point value.
    #[inline]
    pub fn luma_f64(r: u8, g: u8, b: u8) -> f64 {
        let (wr, wg, wb) = LUMA_WEIGHTS;
        wr * r as f64 + wg * g as f64 + wb * b as f64
    }

    /// Luma truncated to a byte.
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> u8 {
        luma_f64(r, g, b) as u8
    }

    /// Clamp a floating-point channel value to a byte.
    ///
    /// Values below 0 become 0, values above 255 become 255, everything
    /// else is truncated toward zero.
    #[inline]
    pub fn clamp_to_byte(value: f64) -> u8 {
        if value < 0.0 {
            0
        } else if value > 255.0 {
            255
        } else {
            value as u8
        }
    }

    /// Extract `(r, g, b, a)` from a BGRA pixel slice.
    #[inline]
    pub fn extract_rgba(px: &[u8]) -> (u8, u8, u8, u8) {
        (px[RED], px[GREEN], px[BLUE], px[ALPHA])
    }

    /// Compose a BGRA pixel from its components.
    #[inline]
    pub fn compose_bgra(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
        [b, g, r, a]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_clamp_to_byte() {
            assert_eq!(clamp_to_byte(-3.5), 0);
            assert_eq!(clamp_to_byte(0.0), 0);
            assert_eq!(clamp_to_byte(127.9), 127);
            assert_eq!(clamp_to_byte(255.0), 255);
            assert_eq!(clamp_to_byte(1000.0), 255);
        }

        #[test]
        fn test_luma_truncates() {
            assert_eq!(luma(0, 0, 0), 0);
            assert_eq!(luma(255, 255, 255), 255);
            // 0.299 * 255 = 76.245
            assert_eq!(luma(255, 0, 0), 76);
        }

        #[test]
        fn test_compose_extract() {
            let px = compose_bgra(1, 2, 3, 4);
            assert_eq!(px, [3, 2, 1, 4]);
            assert_eq!(extract_rgba(&px), (1, 2, 3, 4));
        }
    }
}
