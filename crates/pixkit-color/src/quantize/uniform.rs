//! Uniform quantization

use crate::{ColorError, ColorResult};
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, GREEN, RED};
use tracing::debug;

/// Per-channel division counts for [`uniform_quantize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformOptions {
    pub red_divisions: u32,
    pub green_divisions: u32,
    pub blue_divisions: u32,
}

impl Default for UniformOptions {
    fn default() -> Self {
        Self::new(3, 3, 3)
    }
}

impl UniformOptions {
    pub fn new(red_divisions: u32, green_divisions: u32, blue_divisions: u32) -> Self {
        UniformOptions {
            red_divisions,
            green_divisions,
            blue_divisions,
        }
    }

    /// The same division count on every channel.
    pub fn splat(divisions: u32) -> Self {
        Self::new(divisions, divisions, divisions)
    }

    fn validate(&self) -> ColorResult<()> {
        for (name, d) in [
            ("red", self.red_divisions),
            ("green", self.green_divisions),
            ("blue", self.blue_divisions),
        ] {
            if !(1..=256).contains(&d) {
                return Err(ColorError::InvalidParameters(format!(
                    "{name} divisions must be between 1 and 256, got {d}"
                )));
            }
        }
        Ok(())
    }
}

/// Snap `v` to the nearest multiple of `step` (ties to even), capped at 255.
#[inline]
fn snap(v: u8, step: u32) -> u8 {
    let step = step as f64;
    ((v as f64 / step).round_ties_even() * step).min(255.0) as u8
}

/// Quantize each channel independently to multiples of `256 / divisions`.
///
/// Applying the same options to the output again leaves it unchanged.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if any division count is
/// outside `1..=256`.
pub fn uniform_quantize(buf: &PixelBuffer, options: &UniformOptions) -> ColorResult<PixelBuffer> {
    options.validate()?;
    let steps = [
        (RED, 256 / options.red_divisions),
        (GREEN, 256 / options.green_divisions),
        (BLUE, 256 / options.blue_divisions),
    ];
    debug!(
        r = options.red_divisions,
        g = options.green_divisions,
        b = options.blue_divisions,
        "uniform quantize"
    );

    let mut out = buf.to_mut();
    for px in out.pixels_mut() {
        for (c, step) in steps {
            px[c] = snap(px[c], step);
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> PixelBuffer {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|v| [v, v.wrapping_mul(3), 255 - v, v])
            .collect();
        PixelBuffer::from_bgra(16, 16, data).unwrap()
    }

    #[test]
    fn test_levels() {
        // step 85: levels 0, 85, 170, 255
        let out = uniform_quantize(&ramp(), &UniformOptions::default()).unwrap();
        for px in out.pixels() {
            for c in [RED, GREEN, BLUE] {
                assert!([0, 85, 170, 255].contains(&px[c]), "{}", px[c]);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        for opts in [
            UniformOptions::default(),
            UniformOptions::new(1, 2, 7),
            UniformOptions::splat(5),
            UniformOptions::splat(256),
        ] {
            let once = uniform_quantize(&ramp(), &opts).unwrap();
            let twice = uniform_quantize(&once, &opts).unwrap();
            assert_eq!(once.data(), twice.data(), "{opts:?}");
        }
    }

    #[test]
    fn test_alpha_preserved() {
        let buf = ramp();
        let out = uniform_quantize(&buf, &UniformOptions::splat(2)).unwrap();
        for (a, b) in buf.pixels().zip(out.pixels()) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_invalid_divisions() {
        let buf = ramp();
        assert!(uniform_quantize(&buf, &UniformOptions::new(0, 3, 3)).is_err());
        assert!(uniform_quantize(&buf, &UniformOptions::new(3, 257, 3)).is_err());
    }
}
