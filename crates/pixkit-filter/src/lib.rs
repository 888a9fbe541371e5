//! pixkit-filter - Spatial and point-wise image filters
//!
//! This crate provides filtering operations on BGRA [`PixelBuffer`]s:
//!
//! - Convolution with arbitrary rectangular kernels and a selectable border policy
//! - Built-in kernels (box blur, Gaussian blur, sharpen, edge detection, emboss)
//! - Rank filtering (median, min, max filters)
//! - Weighted grayscale conversion
//! - Tone curves and 256-entry lookup tables
//!
//! Every function returns a new buffer; inputs are never modified.
//!
//! [`PixelBuffer`]: pixkit_core::PixelBuffer

pub mod convolve;
mod error;
pub mod grayscale;
pub mod kernel;
pub mod rank;
pub mod tone;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use convolve::{
    BorderPolicy, ConvolveOptions, box_blur, convolve, edge_detect, emboss, gaussian_blur, sharpen,
};
pub use grayscale::{GrayscaleOptions, OverflowPolicy, convert_to_grayscale};
pub use rank::{max_filter, median_filter, min_filter, rank_filter};
pub use tone::{ControlPoint, Lut, ToneCurve, apply_lut, apply_tone_curve};
