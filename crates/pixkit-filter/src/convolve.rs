//! Convolution operations
//!
//! Applies a [`Kernel`] to the color channels of a BGRA buffer. Channel sums
//! are accumulated in `f64` and stored with [`clamp_to_byte`]; alpha is copied
//! from the source pixel.
//!
//! The interior is the set of pixels whose whole kernel window lies inside
//! the image: `row_off <= y < height - row_off` and
//! `col_off <= x < width - col_off`, where `(row_off, col_off)` is the
//! kernel anchor. What happens outside the interior is selected by
//! [`BorderPolicy`].

use crate::{FilterResult, Kernel};
use pixkit_core::PixelBuffer;
use pixkit_core::color::{ALPHA, BLUE, BYTES_PER_PIXEL, GREEN, RED, clamp_to_byte};
use tracing::debug;

/// How pixels outside the convolution interior are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPolicy {
    /// Border pixels are left transparent black
    #[default]
    Zero,
    /// Border pixels are copied unchanged from the source
    Copy,
    /// Border pixels are convolved with edge-replicated (clamped) coordinates
    Replicate,
}

/// Options for [`convolve`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvolveOptions {
    /// Border handling
    pub border: BorderPolicy,
}

impl ConvolveOptions {
    /// Options with the given border policy.
    pub fn with_border(border: BorderPolicy) -> Self {
        ConvolveOptions { border }
    }
}

/// Convolve a buffer with a kernel.
///
/// # Examples
///
/// ```
/// use pixkit_core::PixelBuffer;
/// use pixkit_filter::{ConvolveOptions, Kernel, convolve};
///
/// let buf = PixelBuffer::new(8, 8).unwrap();
/// let out = convolve(&buf, &Kernel::box_blur(), &ConvolveOptions::default()).unwrap();
/// assert_eq!(out.width(), 8);
/// ```
pub fn convolve(
    buf: &PixelBuffer,
    kernel: &Kernel,
    options: &ConvolveOptions,
) -> FilterResult<PixelBuffer> {
    let w = buf.width();
    let h = buf.height();
    let (row_off, col_off) = kernel.anchor();

    debug!(
        width = w,
        height = h,
        kernel_rows = kernel.rows(),
        kernel_cols = kernel.cols(),
        border = ?options.border,
        "convolve"
    );

    let mut out = buf.create_template();
    let src = buf.data();
    let stride = buf.stride();

    let y_end = h.saturating_sub(row_off);
    let x_end = w.saturating_sub(col_off);
    let is_interior = |x: u32, y: u32| y >= row_off && y < y_end && x >= col_off && x < x_end;

    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            let i = y as usize * stride + x as usize * BYTES_PER_PIXEL;
            if is_interior(x, y) {
                let sums = window_sum(buf, kernel, x, y, false);
                write_sums(&mut dst[i..i + BYTES_PER_PIXEL], sums, src[i + ALPHA]);
                continue;
            }
            match options.border {
                BorderPolicy::Zero => {}
                BorderPolicy::Copy => {
                    dst[i..i + BYTES_PER_PIXEL].copy_from_slice(&src[i..i + BYTES_PER_PIXEL]);
                }
                BorderPolicy::Replicate => {
                    let sums = window_sum(buf, kernel, x, y, true);
                    write_sums(&mut dst[i..i + BYTES_PER_PIXEL], sums, src[i + ALPHA]);
                }
            }
        }
    }

    Ok(out.into())
}

/// Apply the 3x3 box blur kernel.
pub fn box_blur(buf: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(buf, &Kernel::box_blur(), &ConvolveOptions::default())
}

/// Apply the 3x3 Gaussian blur kernel.
pub fn gaussian_blur(buf: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(buf, &Kernel::gaussian_blur(), &ConvolveOptions::default())
}

/// Apply the 3x3 sharpen kernel.
pub fn sharpen(buf: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(buf, &Kernel::sharpen(), &ConvolveOptions::default())
}

/// Apply the 3x3 edge detection kernel.
pub fn edge_detect(buf: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(buf, &Kernel::edge_detect(), &ConvolveOptions::default())
}

/// Apply the 3x3 emboss kernel.
pub fn emboss(buf: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve(buf, &Kernel::emboss(), &ConvolveOptions::default())
}

/// Weighted `(b, g, r)` sums of the window anchored at (x, y).
fn window_sum(buf: &PixelBuffer, kernel: &Kernel, x: u32, y: u32, clamp: bool) -> [f64; 3] {
    let (ar, ac) = kernel.anchor();
    let w = buf.width() as i64;
    let h = buf.height() as i64;
    let src = buf.data();
    let stride = buf.stride();
    let mut sums = [0.0f64; 3];

    for (ky, row) in kernel.row_slices().enumerate() {
        let mut sy = y as i64 + ky as i64 - ar as i64;
        if clamp {
            sy = sy.clamp(0, h - 1);
        }
        for (kx, &k) in row.iter().enumerate() {
            let mut sx = x as i64 + kx as i64 - ac as i64;
            if clamp {
                sx = sx.clamp(0, w - 1);
            }
            let i = sy as usize * stride + sx as usize * BYTES_PER_PIXEL;
            sums[0] += src[i + BLUE] as f64 * k;
            sums[1] += src[i + GREEN] as f64 * k;
            sums[2] += src[i + RED] as f64 * k;
        }
    }
    sums
}

fn write_sums(px: &mut [u8], sums: [f64; 3], alpha: u8) {
    px[BLUE] = clamp_to_byte(sums[0]);
    px[GREEN] = clamp_to_byte(sums[1]);
    px[RED] = clamp_to_byte(sums[2]);
    px[ALPHA] = alpha;
}
