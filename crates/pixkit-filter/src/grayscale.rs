//! Grayscale conversion
//!
//! `gray = wR*R + wG*G + wB*B`, written to all three color channels.
//! Weights are not normalized. Results outside 0..=255 are resolved by
//! [`OverflowPolicy`].

use crate::FilterResult;
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, GREEN, LUMA_WEIGHTS, RED, clamp_to_byte};
use tracing::debug;

/// How a weighted sum outside the byte range is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Truncate toward zero, then keep the low 8 bits
    #[default]
    Wrap,
    /// Clamp to 0..=255
    Saturate,
}

/// Channel weights for [`convert_to_grayscale`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayscaleOptions {
    pub red_weight: f64,
    pub green_weight: f64,
    pub blue_weight: f64,
    pub overflow: OverflowPolicy,
}

impl Default for GrayscaleOptions {
    /// Rec. 601 luma weights.
    fn default() -> Self {
        let (r, g, b) = LUMA_WEIGHTS;
        Self::new(r, g, b)
    }
}

impl GrayscaleOptions {
    /// Options with explicit weights and the default overflow policy.
    pub fn new(red_weight: f64, green_weight: f64, blue_weight: f64) -> Self {
        GrayscaleOptions {
            red_weight,
            green_weight,
            blue_weight,
            overflow: OverflowPolicy::default(),
        }
    }

    /// Equal weights of one third.
    pub fn average() -> Self {
        Self::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
    }

    /// Replace the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Gray value of one color.
    pub fn gray(&self, r: u8, g: u8, b: u8) -> u8 {
        let v = self.red_weight * r as f64 + self.green_weight * g as f64 + self.blue_weight * b as f64;
        match self.overflow {
            OverflowPolicy::Wrap => (v as i64) as u8,
            OverflowPolicy::Saturate => clamp_to_byte(v),
        }
    }
}

/// Convert a buffer to grayscale.
///
/// # Examples
///
/// ```
/// use pixkit_core::PixelBuffer;
/// use pixkit_filter::{GrayscaleOptions, convert_to_grayscale};
///
/// let buf = PixelBuffer::from_bgra(1, 1, vec![10, 10, 10, 255]).unwrap();
/// let gray = convert_to_grayscale(&buf, &GrayscaleOptions::default()).unwrap();
/// assert_eq!(gray.data(), &[10, 10, 10, 255]);
/// ```
pub fn convert_to_grayscale(
    buf: &PixelBuffer,
    options: &GrayscaleOptions,
) -> FilterResult<PixelBuffer> {
    debug!(
        r = options.red_weight,
        g = options.green_weight,
        b = options.blue_weight,
        "grayscale"
    );

    let mut out = buf.to_mut();
    for px in out.pixels_mut() {
        let gray = options.gray(px[RED], px[GREEN], px[BLUE]);
        px[BLUE] = gray;
        px[GREEN] = gray;
        px[RED] = gray;
    }
    Ok(out.into())
}
