//! Rank filtering operations
//!
//! Provides rank (order-statistic) filters: median, min and max.
//!
//! Each color channel is ranked independently over a square `size x size`
//! window. Window coordinates are clamped to the image, so edge pixels are
//! processed with replicated neighbors. Alpha is passed through.

use crate::{FilterError, FilterResult};
use pixkit_core::PixelBuffer;
use pixkit_core::color::{ALPHA, BLUE, BYTES_PER_PIXEL, GREEN, RED};
use tracing::debug;

/// Apply a rank filter.
///
/// # Arguments
/// * `buf` - Input buffer
/// * `size` - Window side length; must be odd and at least 1
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
///
/// The sample selected from the `count` sorted window values is at index
/// `floor(rank * count)`, capped at `count - 1`.
pub fn rank_filter(buf: &PixelBuffer, size: u32, rank: f32) -> FilterResult<PixelBuffer> {
    if size < 1 || size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window size must be odd and positive, got {size}"
        )));
    }
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0.0, 1.0], got {rank}"
        )));
    }
    let count = size.checked_mul(size).ok_or_else(|| {
        FilterError::InvalidParameters(format!("window size {size} is too large"))
    })? as usize;

    debug!(width = buf.width(), height = buf.height(), size, rank, "rank filter");

    let w = buf.width() as i64;
    let h = buf.height() as i64;
    let radius = (size / 2) as i64;
    let index = ((rank * count as f32) as usize).min(count - 1);

    let src = buf.data();
    let stride = buf.stride();
    let mut out = buf.create_template();
    let dst = out.data_mut();

    let mut blues = Vec::with_capacity(count);
    let mut greens = Vec::with_capacity(count);
    let mut reds = Vec::with_capacity(count);

    for y in 0..h {
        for x in 0..w {
            blues.clear();
            greens.clear();
            reds.clear();
            for ky in -radius..=radius {
                let ny = (y + ky).clamp(0, h - 1) as usize;
                for kx in -radius..=radius {
                    let nx = (x + kx).clamp(0, w - 1) as usize;
                    let n = ny * stride + nx * BYTES_PER_PIXEL;
                    blues.push(src[n + BLUE]);
                    greens.push(src[n + GREEN]);
                    reds.push(src[n + RED]);
                }
            }

            let i = y as usize * stride + x as usize * BYTES_PER_PIXEL;
            dst[i + BLUE] = *blues.select_nth_unstable(index).1;
            dst[i + GREEN] = *greens.select_nth_unstable(index).1;
            dst[i + RED] = *reds.select_nth_unstable(index).1;
            dst[i + ALPHA] = src[i + ALPHA];
        }
    }

    Ok(out.into())
}

/// Apply median filter (rank = 0.5).
///
/// Takes the sorted sample at index `count / 2`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `size` is 0 or even.
pub fn median_filter(buf: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(buf, size, 0.5)
}

/// Apply minimum filter (rank = 0.0).
pub fn min_filter(buf: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(buf, size, 0.0)
}

/// Apply maximum filter (rank = 1.0).
pub fn max_filter(buf: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(buf, size, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_core::{PixelBufferMut, Rgb};

    fn with_speck() -> PixelBuffer {
        let mut m = PixelBufferMut::new(5, 5).unwrap();
        m.fill(Rgb::new(10, 20, 30), 128);
        m.set_rgba_unchecked(2, 2, Rgb::new(250, 250, 250), 9);
        m.into()
    }

    #[test]
    fn test_size_one_is_identity() {
        let buf = with_speck();
        let out = median_filter(&buf, 1).unwrap();
        assert_eq!(out.data(), buf.data());
    }

    #[test]
    fn test_even_or_zero_size_rejected() {
        let buf = with_speck();
        assert!(median_filter(&buf, 0).is_err());
        assert!(median_filter(&buf, 4).is_err());
        assert!(rank_filter(&buf, 3, 1.5).is_err());
        assert!(matches!(
            median_filter(&buf, 65_537),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_median_removes_speck() {
        let buf = with_speck();
        let out = median_filter(&buf, 3).unwrap();
        assert_eq!(out.get_rgb(2, 2), Some(Rgb::new(10, 20, 30)));
        // alpha is copied, not filtered
        assert_eq!(out.get_alpha(2, 2), Some(9));
        assert_eq!(out.get_alpha(0, 0), Some(128));
    }

    #[test]
    fn test_min_max() {
        let buf = with_speck();
        let max = max_filter(&buf, 3).unwrap();
        assert_eq!(max.get_rgb(1, 1), Some(Rgb::gray(250)));
        assert_eq!(max.get_rgb(0, 0), Some(Rgb::new(10, 20, 30)));
        let min = min_filter(&buf, 3).unwrap();
        assert_eq!(min.get_rgb(2, 2), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_edges_use_clamped_window() {
        // Corner pixel: 3x3 clamped window over a 2x2 image sees the corner 4 times
        let mut m = PixelBufferMut::new(2, 2).unwrap();
        m.set_rgba_unchecked(0, 0, Rgb::gray(100), 255);
        m.set_rgba_unchecked(1, 0, Rgb::gray(0), 255);
        m.set_rgba_unchecked(0, 1, Rgb::gray(0), 255);
        m.set_rgba_unchecked(1, 1, Rgb::gray(0), 255);
        let buf: PixelBuffer = m.into();
        let out = median_filter(&buf, 3).unwrap();
        // window at (0,0): 100 x4, 0 x5 -> sorted[4] = 0
        assert_eq!(out.get_rgb(0, 0), Some(Rgb::gray(0)));
    }
}
