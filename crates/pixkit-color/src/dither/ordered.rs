//! Ordered (Bayer) dithering

use super::{quantize_to_step, step_for_shades};
use crate::{ColorError, ColorResult};
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, BYTES_PER_PIXEL, GREEN, RED, luma};
use tracing::debug;

const BAYER_2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

const BAYER_3: [[u8; 3]; 3] = [[0, 7, 3], [6, 5, 2], [4, 1, 8]];

const BAYER_4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// `4 * BAYER_3[r / 2][c / 2] + BAYER_2[r % 2][c % 2]`
const BAYER_6: [[u8; 6]; 6] = [
    [0, 2, 28, 30, 12, 14],
    [3, 1, 31, 29, 15, 13],
    [24, 26, 20, 22, 8, 10],
    [27, 25, 23, 21, 11, 9],
    [16, 18, 4, 6, 32, 34],
    [19, 17, 7, 5, 35, 33],
];

/// Threshold matrix for [`ordered_dither`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BayerMatrix {
    Size2,
    Size3,
    #[default]
    Size4,
    Size6,
}

impl BayerMatrix {
    /// Every supported matrix, smallest first.
    pub const ALL: [BayerMatrix; 4] = [
        BayerMatrix::Size2,
        BayerMatrix::Size3,
        BayerMatrix::Size4,
        BayerMatrix::Size6,
    ];

    /// Look up a matrix by side length.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnsupportedBayerSize`] for sizes other than 2, 3, 4 and 6.
    pub fn from_size(size: u32) -> ColorResult<Self> {
        match size {
            2 => Ok(BayerMatrix::Size2),
            3 => Ok(BayerMatrix::Size3),
            4 => Ok(BayerMatrix::Size4),
            6 => Ok(BayerMatrix::Size6),
            _ => Err(ColorError::UnsupportedBayerSize(size)),
        }
    }

    /// Side length.
    pub fn size(self) -> u32 {
        match self {
            BayerMatrix::Size2 => 2,
            BayerMatrix::Size3 => 3,
            BayerMatrix::Size4 => 4,
            BayerMatrix::Size6 => 6,
        }
    }

    /// Raw matrix entry at `(x mod n, y mod n)`.
    #[inline]
    pub fn value(self, x: u32, y: u32) -> u8 {
        let n = self.size();
        let (col, row) = ((x % n) as usize, (y % n) as usize);
        match self {
            BayerMatrix::Size2 => BAYER_2[row][col],
            BayerMatrix::Size3 => BAYER_3[row][col],
            BayerMatrix::Size4 => BAYER_4[row][col],
            BayerMatrix::Size6 => BAYER_6[row][col],
        }
    }

    /// Entry scaled onto 0..255: `value * 255 / n²`, truncated.
    #[inline]
    pub fn threshold(self, x: u32, y: u32) -> u32 {
        let n = self.size();
        self.value(x, y) as u32 * 255 / (n * n)
    }
}

impl TryFrom<u32> for BayerMatrix {
    type Error = ColorError;

    fn try_from(size: u32) -> ColorResult<Self> {
        Self::from_size(size)
    }
}

/// Dither to a monochrome image using a tiled Bayer threshold matrix.
///
/// Each pixel's gray level is its truncated luma. Where it exceeds the
/// matrix threshold `step/2` is added, otherwise subtracted, and the result
/// is snapped with [`quantize_to_step`] and written to R, G and B.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] unless `2 <= num_shades <= 256`.
pub fn ordered_dither(
    buf: &PixelBuffer,
    num_shades: u32,
    matrix: BayerMatrix,
) -> ColorResult<PixelBuffer> {
    let step = step_for_shades(num_shades)?;
    let half = (step / 2) as i32;
    debug!(
        width = buf.width(),
        height = buf.height(),
        num_shades,
        size = matrix.size(),
        "ordered dither"
    );

    let w = buf.width();
    let mut out = buf.to_mut();
    for y in 0..buf.height() {
        let row = out.row_data_mut(y);
        for (x, px) in (0..w).zip(row.chunks_exact_mut(BYTES_PER_PIXEL)) {
            let gray = luma(px[RED], px[GREEN], px[BLUE]);
            let biased = if gray as u32 > matrix.threshold(x, y) {
                gray as i32 + half
            } else {
                gray as i32 - half
            };
            let v = quantize_to_step(biased, step);
            px[RED] = v;
            px[GREEN] = v;
            px[BLUE] = v;
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size() {
        for m in BayerMatrix::ALL {
            assert_eq!(BayerMatrix::from_size(m.size()).unwrap(), m);
            assert_eq!(BayerMatrix::try_from(m.size()).unwrap(), m);
        }
        for size in [0, 1, 5, 7, 8] {
            assert!(matches!(
                BayerMatrix::from_size(size),
                Err(ColorError::UnsupportedBayerSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn test_matrices_are_permutations() {
        for m in BayerMatrix::ALL {
            let n = m.size();
            let mut seen: Vec<u32> = (0..n)
                .flat_map(|y| (0..n).map(move |x| m.value(x, y) as u32))
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n * n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_threshold_tiles() {
        let m = BayerMatrix::Size2;
        assert_eq!(m.threshold(0, 0), 0);
        assert_eq!(m.threshold(1, 0), 127);
        assert_eq!(m.threshold(0, 1), 191);
        assert_eq!(m.threshold(1, 1), 63);
        assert_eq!(m.threshold(2, 2), m.threshold(0, 0));
        assert_eq!(m.threshold(3, 5), m.threshold(1, 1));
    }

    #[test]
    fn test_six_by_six_thresholds() {
        let m = BayerMatrix::Size6;
        assert_eq!(m.value(4, 5), 35);
        assert_eq!(m.threshold(4, 5), 247);
        for y in 0..6 {
            for x in 0..6 {
                assert!(m.threshold(x, y) < 255);
            }
        }
    }

    #[test]
    fn test_six_by_six_bias() {
        // gray 200, step 127: below 247 biases down to 137 -> 127,
        // above 0 biases up to 263 -> 254
        let buf = PixelBuffer::from_bgra(6, 6, [200u8, 200, 200, 255].repeat(36)).unwrap();
        let out = ordered_dither(&buf, 3, BayerMatrix::Size6).unwrap();
        assert_eq!(out.get_pixel(4, 5), Some([127, 127, 127, 255]));
        assert_eq!(out.get_pixel(0, 0), Some([254, 254, 254, 255]));
    }

    #[test]
    fn test_mid_gray_checkerboard() {
        // luma of (128, 128, 128) truncates to 127
        let buf = PixelBuffer::from_bgra(2, 2, [128u8, 128, 128, 255].repeat(4)).unwrap();
        let out = ordered_dither(&buf, 2, BayerMatrix::Size2).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(1, 0), Some([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(0, 1), Some([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_monochrome_output() {
        let data: Vec<u8> = (0..36u32)
            .flat_map(|i| [(i * 7) as u8, (i * 5) as u8, (i * 3) as u8, 40])
            .collect();
        let buf = PixelBuffer::from_bgra(6, 6, data).unwrap();
        let out = ordered_dither(&buf, 3, BayerMatrix::Size6).unwrap();
        for px in out.pixels() {
            assert_eq!(px[RED], px[GREEN]);
            assert_eq!(px[GREEN], px[BLUE]);
            assert!([0, 127, 254].contains(&px[RED]));
            assert_eq!(px[3], 40);
        }
    }
}
