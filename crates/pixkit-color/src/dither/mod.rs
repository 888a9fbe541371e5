//! Dithering
//!
//! Four algorithms reduce each pixel to `num_shades` evenly spaced levels:
//!
//! - [`random_dither`]: per-pixel uniform noise before quantizing (color)
//! - [`average_dither`]: `±step/2` bias against the global mean brightness (color)
//! - [`ordered_dither`]: `±step/2` bias against a Bayer threshold (monochrome)
//! - [`error_diffusion_dither`]: quantization error pushed to unvisited
//!   neighbors (monochrome)
//!
//! All four share [`quantize_to_step`] and [`step_for_shades`]. Alpha is
//! always passed through.

mod average;
mod diffusion;
mod ordered;
mod random;

pub use average::average_dither;
pub use diffusion::{DiffusionFilter, error_diffusion_dither};
pub use ordered::{BayerMatrix, ordered_dither};
pub use random::random_dither;

use crate::{ColorError, ColorResult};

/// Largest supported shade count.
pub const MAX_SHADES: u32 = 256;

/// Spacing between output levels for `num_shades` shades: `255 / (num_shades - 1)`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] unless `2 <= num_shades <= 256`.
pub fn step_for_shades(num_shades: u32) -> ColorResult<u32> {
    if !(2..=MAX_SHADES).contains(&num_shades) {
        return Err(ColorError::InvalidParameters(format!(
            "number of shades must be between 2 and {MAX_SHADES}, got {num_shades}"
        )));
    }
    Ok(255 / (num_shades - 1))
}

/// Snap a value to the nearest multiple of `step`.
///
/// The input is clamped to 0..=255 first; halfway cases round to the even
/// multiple, and a product above 255 is clamped to 255.
///
/// # Panics
///
/// Panics if `step` is 0.
#[inline]
pub fn quantize_to_step(value: i32, step: u32) -> u8 {
    assert!(step > 0, "quantization step must be positive");
    let v = value.clamp(0, 255) as f64;
    let step = step as f64;
    ((v / step).round_ties_even() * step).min(255.0) as u8
}
