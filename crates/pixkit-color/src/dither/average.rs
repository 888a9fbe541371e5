//! Average dithering

use super::{quantize_to_step, step_for_shades};
use crate::ColorResult;
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, GREEN, RED};
use tracing::debug;

/// Per-pixel brightness used for the comparison: integer mean of R, G, B.
#[inline]
fn brightness(px: &[u8]) -> u32 {
    (px[RED] as u32 + px[GREEN] as u32 + px[BLUE] as u32) / 3
}

/// Dither against the image's mean brightness.
///
/// The threshold is the integer average of every pixel's brightness
/// `(R + G + B) / 3`. Pixels brighter than the threshold have `step/2`
/// added to each channel, the rest have it subtracted; each channel is then
/// snapped with [`quantize_to_step`].
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`](crate::ColorError::InvalidParameters)
/// unless `2 <= num_shades <= 256`.
pub fn average_dither(buf: &PixelBuffer, num_shades: u32) -> ColorResult<PixelBuffer> {
    let step = step_for_shades(num_shades)?;
    let half = (step / 2) as i32;

    let total: u64 = buf.pixels().map(|px| brightness(px) as u64).sum();
    let average = (total / buf.pixel_count() as u64) as u32;
    debug!(width = buf.width(), height = buf.height(), num_shades, average, "average dither");

    let mut out = buf.to_mut();
    for px in out.pixels_mut() {
        let bias = if brightness(px) > average { half } else { -half };
        for c in [RED, GREEN, BLUE] {
            px[c] = quantize_to_step(px[c] as i32 + bias, step);
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_core::Rgb;

    #[test]
    fn test_two_tone_split() {
        // mean brightness is 105; the 10 side drops to 0, the 200 side rises to 255
        let data = [10u8, 10, 10, 255, 200, 200, 200, 255].repeat(2);
        let buf = PixelBuffer::from_bgra(2, 2, data).unwrap();
        let out = average_dither(&buf, 2).unwrap();
        assert_eq!(out.get_rgb(0, 0), Some(Rgb::BLACK));
        assert_eq!(out.get_rgb(1, 0), Some(Rgb::WHITE));
        assert_eq!(out.get_rgb(0, 1), Some(Rgb::BLACK));
        assert_eq!(out.get_rgb(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_uniform_image_drops() {
        // brightness equals the average, so every pixel is biased down
        let buf = PixelBuffer::from_bgra(2, 1, [170u8, 170, 170, 9].repeat(2)).unwrap();
        let out = average_dither(&buf, 4).unwrap();
        // 170 - 42 = 128, 128 / 85 = 1.5 -> 2 -> 170
        assert_eq!(out.data(), [170u8, 170, 170, 9].repeat(2).as_slice());
    }

    #[test]
    fn test_invalid_shades() {
        let buf = PixelBuffer::new(1, 1).unwrap();
        assert!(average_dither(&buf, 0).is_err());
    }
}
