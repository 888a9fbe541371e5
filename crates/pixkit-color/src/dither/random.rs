//! Random dithering

use super::{quantize_to_step, step_for_shades};
use crate::ColorResult;
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, GREEN, RED};
use rand::Rng;
use tracing::debug;

/// Dither each pixel with uniform noise before quantizing.
///
/// One noise value in `[-step/2, step/2)` is drawn per pixel and added to R,
/// G and B before each is snapped with [`quantize_to_step`]. When `step/2`
/// is 0 no noise is added. The caller supplies the generator, so a seeded
/// generator gives reproducible output.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`](crate::ColorError::InvalidParameters)
/// unless `2 <= num_shades <= 256`.
pub fn random_dither<R>(buf: &PixelBuffer, num_shades: u32, rng: &mut R) -> ColorResult<PixelBuffer>
where
    R: Rng + ?Sized,
{
    let step = step_for_shades(num_shades)?;
    let half = (step / 2) as i32;
    debug!(width = buf.width(), height = buf.height(), num_shades, step, "random dither");

    let mut out = buf.to_mut();
    for px in out.pixels_mut() {
        let noise = if half > 0 {
            rng.random_range(-half..half)
        } else {
            0
        };
        for c in [RED, GREEN, BLUE] {
            px[c] = quantize_to_step(px[c] as i32 + noise, step);
        }
    }
    Ok(out.into())
}
