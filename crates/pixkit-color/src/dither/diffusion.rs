//! Error-diffusion dithering
//!
//! Pixels are visited in row-major order. The difference between a pixel's
//! (error-adjusted) luma and its quantized value is distributed to
//! neighbors that have not been visited yet, weighted by the filter's taps.

use super::{quantize_to_step, step_for_shades};
use crate::{ColorError, ColorResult};
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, BYTES_PER_PIXEL, GREEN, RED, luma_f64};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One diffusion tap: `(dx, dy, weight)`
pub type Tap = (i32, i32, f64);

const FLOYD_STEINBERG: [Tap; 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

const BURKES: [Tap; 7] = [
    (1, 0, 8.0 / 32.0),
    (2, 0, 4.0 / 32.0),
    (-2, 1, 2.0 / 32.0),
    (-1, 1, 4.0 / 32.0),
    (0, 1, 8.0 / 32.0),
    (1, 1, 4.0 / 32.0),
    (2, 1, 2.0 / 32.0),
];

const STUCKI: [Tap; 12] = [
    (1, 0, 8.0 / 42.0),
    (2, 0, 4.0 / 42.0),
    (-2, 1, 2.0 / 42.0),
    (-1, 1, 4.0 / 42.0),
    (0, 1, 8.0 / 42.0),
    (1, 1, 4.0 / 42.0),
    (2, 1, 2.0 / 42.0),
    (-2, 2, 1.0 / 42.0),
    (-1, 2, 2.0 / 42.0),
    (0, 2, 4.0 / 42.0),
    (1, 2, 2.0 / 42.0),
    (2, 2, 1.0 / 42.0),
];

const SIERRA: [Tap; 10] = [
    (1, 0, 5.0 / 32.0),
    (2, 0, 3.0 / 32.0),
    (-2, 1, 2.0 / 32.0),
    (-1, 1, 4.0 / 32.0),
    (0, 1, 5.0 / 32.0),
    (1, 1, 4.0 / 32.0),
    (2, 1, 2.0 / 32.0),
    (-1, 2, 2.0 / 32.0),
    (0, 2, 3.0 / 32.0),
    (1, 2, 2.0 / 32.0),
];

// Six taps of 1/8: only three quarters of the error is propagated.
const ATKINSON: [Tap; 6] = [
    (1, 0, 1.0 / 8.0),
    (2, 0, 1.0 / 8.0),
    (-1, 1, 1.0 / 8.0),
    (0, 1, 1.0 / 8.0),
    (1, 1, 1.0 / 8.0),
    (0, 2, 1.0 / 8.0),
];

/// Error-diffusion kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffusionFilter {
    #[default]
    FloydSteinberg,
    Burkes,
    Stucki,
    Sierra,
    Atkinson,
}

impl DiffusionFilter {
    /// Every filter, in display order.
    pub const ALL: [DiffusionFilter; 5] = [
        DiffusionFilter::FloydSteinberg,
        DiffusionFilter::Burkes,
        DiffusionFilter::Stucki,
        DiffusionFilter::Sierra,
        DiffusionFilter::Atkinson,
    ];

    /// Display name, as accepted by [`DiffusionFilter::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            DiffusionFilter::FloydSteinberg => "Floyd-Steinberg",
            DiffusionFilter::Burkes => "Burkes",
            DiffusionFilter::Stucki => "Stucki",
            DiffusionFilter::Sierra => "Sierra",
            DiffusionFilter::Atkinson => "Atkinson",
        }
    }

    /// Look up a filter by display name.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnknownFilter`] if no filter has that name.
    pub fn from_name(name: &str) -> ColorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| ColorError::UnknownFilter(name.to_string()))
    }

    /// Neighbor offsets and weights. Offsets never point at visited pixels.
    pub fn taps(self) -> &'static [Tap] {
        match self {
            DiffusionFilter::FloydSteinberg => &FLOYD_STEINBERG,
            DiffusionFilter::Burkes => &BURKES,
            DiffusionFilter::Stucki => &STUCKI,
            DiffusionFilter::Sierra => &SIERRA,
            DiffusionFilter::Atkinson => &ATKINSON,
        }
    }
}

impl fmt::Display for DiffusionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiffusionFilter {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        Self::from_name(s)
    }
}

/// Dither to a monochrome image by error diffusion.
///
/// For each pixel, `old = luma + accumulated error`, `new = quantize_to_step(old)`,
/// and `old - new` is added to each in-bounds neighbor in proportion to the
/// tap weights. Taps falling outside the image are dropped. The result is
/// written to R, G and B; alpha is passed through.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] unless `2 <= num_shades <= 256`.
pub fn error_diffusion_dither(
    buf: &PixelBuffer,
    num_shades: u32,
    filter: DiffusionFilter,
) -> ColorResult<PixelBuffer> {
    let step = step_for_shades(num_shades)?;
    debug!(
        width = buf.width(),
        height = buf.height(),
        num_shades,
        filter = filter.name(),
        "error diffusion dither"
    );

    let w = buf.width() as i32;
    let h = buf.height() as i32;
    let taps = filter.taps();
    let mut error = vec![0.0f64; buf.pixel_count()];

    let mut out = buf.to_mut();
    let stride = out.stride();
    let data = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let off = y as usize * stride + x as usize * BYTES_PER_PIXEL;
            let px = &mut data[off..off + BYTES_PER_PIXEL];

            let old = luma_f64(px[RED], px[GREEN], px[BLUE]) + error[idx];
            let new = quantize_to_step(old as i32, step);
            px[RED] = new;
            px[GREEN] = new;
            px[BLUE] = new;

            let err = old - new as f64;
            for &(dx, dy, weight) in taps {
                let (nx, ny) = (x + dx, y + dy);
                if (0..w).contains(&nx) && (0..h).contains(&ny) {
                    error[(ny * w + nx) as usize] += err * weight;
                }
            }
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for f in DiffusionFilter::ALL {
            assert_eq!(DiffusionFilter::from_name(f.name()).unwrap(), f);
            assert_eq!(f.to_string().parse::<DiffusionFilter>().unwrap(), f);
        }
        assert!(matches!(
            DiffusionFilter::from_name("floyd"),
            Err(ColorError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_weight_sums() {
        for f in DiffusionFilter::ALL {
            let sum: f64 = f.taps().iter().map(|t| t.2).sum();
            let expected = if f == DiffusionFilter::Atkinson { 0.75 } else { 1.0 };
            assert!((sum - expected).abs() < 1e-12, "{f}: {sum}");
        }
    }

    #[test]
    fn test_taps_point_forward() {
        for f in DiffusionFilter::ALL {
            for &(dx, dy, _) in f.taps() {
                assert!(dy > 0 || (dy == 0 && dx > 0), "{f}: ({dx}, {dy})");
            }
        }
    }

    #[test]
    fn test_extremes_unchanged() {
        let data = [0u8, 0, 0, 255, 255, 255, 255, 128].repeat(8);
        let buf = PixelBuffer::from_bgra(4, 4, data.clone()).unwrap();
        for f in DiffusionFilter::ALL {
            let out = error_diffusion_dither(&buf, 2, f).unwrap();
            assert_eq!(out.data(), data.as_slice(), "{f}");
        }
    }

    #[test]
    fn test_floyd_steinberg_single_row() {
        // 100, 100: first -> 0 with error 100 (approximately), 7/16 of it goes right:
        // 100 + 43.75 = 143.75 -> 255
        let buf = PixelBuffer::from_bgra(2, 1, [100u8, 100, 100, 255].repeat(2)).unwrap();
        let out = error_diffusion_dither(&buf, 2, DiffusionFilter::FloydSteinberg).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(1, 0), Some([255, 255, 255, 255]));
    }
}
