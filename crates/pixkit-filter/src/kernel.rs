//! Convolution kernels
//!
//! Defines the rectangular weight matrix used by [`crate::convolve`].
//! The anchor is always `(rows / 2, cols / 2)`, so even-sized kernels are
//! biased toward the top-left.
//!
//! Built-in kernels:
//! - [`Kernel::box_blur`] - 3x3 average
//! - [`Kernel::gaussian_blur`] - 3x3 1-2-1 binomial
//! - [`Kernel::sharpen`]
//! - [`Kernel::edge_detect`]
//! - [`Kernel::emboss`]

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Number of rows
    rows: u32,
    /// Number of columns
    cols: u32,
    /// Kernel weights (row-major order)
    weights: Vec<f64>,
}

impl Kernel {
    /// Create a new all-zero kernel with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is 0.
    pub fn new(rows: u32, cols: u32) -> FilterResult<Self> {
        check_size(rows, cols)?;
        Ok(Kernel {
            rows,
            cols,
            weights: vec![0.0; rows as usize * cols as usize],
        })
    }

    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if a dimension is 0 or if
    /// `weights.len() != rows * cols`.
    pub fn from_slice(rows: u32, cols: u32, weights: &[f64]) -> FilterResult<Self> {
        check_size(rows, cols)?;
        let expected = rows as usize * cols as usize;
        if weights.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "expected {expected} weights for {rows}x{cols}, got {}",
                weights.len()
            )));
        }
        Ok(Kernel {
            rows,
            cols,
            weights: weights.to_vec(),
        })
    }

    /// Create a kernel from nested rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> FilterResult<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut weights = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(FilterError::InvalidKernel(format!(
                    "row {i} has {} weights, expected {cols}",
                    row.len()
                )));
            }
            weights.extend_from_slice(row);
        }
        Self::from_slice(rows.len() as u32, cols as u32, &weights)
    }

    /// Kernel with a single 1.0 at its anchor.
    pub fn identity(rows: u32, cols: u32) -> FilterResult<Self> {
        let mut k = Self::new(rows, cols)?;
        let (ar, ac) = k.anchor();
        k.set(ar, ac, 1.0);
        Ok(k)
    }

    /// 3x3 box blur, all weights `1/9`.
    pub fn box_blur() -> Self {
        Kernel {
            rows: 3,
            cols: 3,
            weights: vec![1.0 / 9.0; 9],
        }
    }

    /// 3x3 Gaussian blur approximation (`1 2 1` outer product, sum 16).
    pub fn gaussian_blur() -> Self {
        let w = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];
        Kernel {
            rows: 3,
            cols: 3,
            weights: w.iter().map(|v| v / 16.0).collect(),
        }
    }

    /// 3x3 sharpening kernel.
    pub fn sharpen() -> Self {
        Kernel {
            rows: 3,
            cols: 3,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// 3x3 edge detection (Laplacian-style, all neighbors -1, center 8).
    pub fn edge_detect() -> Self {
        let mut weights = vec![-1.0; 9];
        weights[4] = 8.0;
        Kernel {
            rows: 3,
            cols: 3,
            weights,
        }
    }

    /// 3x3 emboss kernel.
    pub fn emboss() -> Self {
        Kernel {
            rows: 3,
            cols: 3,
            weights: vec![-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0],
        }
    }

    /// Get the number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Get the number of columns.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Anchor position as `(row, col)`.
    #[inline]
    pub fn anchor(&self) -> (u32, u32) {
        (self.rows / 2, self.cols / 2)
    }

    /// Get the weights in row-major order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterate over the kernel rows.
    pub fn row_slices(&self) -> std::slice::ChunksExact<'_, f64> {
        self.weights.chunks_exact(self.cols as usize)
    }

    /// Get a weight at (row, col).
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.weights[(row * self.cols + col) as usize])
    }

    /// Set a weight at (row, col). Out-of-range positions are ignored.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: f64) {
        if row < self.rows && col < self.cols {
            self.weights[(row * self.cols + col) as usize] = value;
        }
    }

    /// Get the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Scale the kernel so that its weights sum to 1.
    ///
    /// A kernel summing to zero (edge detectors) is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f64::EPSILON {
            for w in &mut self.weights {
                *w /= sum;
            }
        }
    }
}

fn check_size(rows: u32, cols: u32) -> FilterResult<()> {
    if rows == 0 || cols == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel dimensions must be positive, got {rows}x{cols}"
        )));
    }
    Ok(())
}
