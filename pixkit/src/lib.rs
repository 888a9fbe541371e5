//! pixkit - Pixel-processing core for image editing
//!
//! Every transform takes a BGRA [`PixelBuffer`] plus parameters and returns
//! a new buffer of the same size; inputs are never modified and alpha is
//! passed through.
//!
//! - Spatial filters: convolution, rank/median filtering ([`filter`])
//! - Point-wise mapping: grayscale, tone curves, lookup tables ([`filter`])
//! - Dithering and color quantization ([`color`])
//! - Kernel, tone-curve, weight and raster file formats ([`io`])
//!
//! The [`apply`] module pairs each persisted definition with its transform
//! so a caller can load a named filter and apply it in one step.
//!
//! # Example
//!
//! ```
//! use pixkit::PixelBuffer;
//! use pixkit::color::{BayerMatrix, ordered_dither};
//!
//! let buf = PixelBuffer::from_bgra(2, 2, [128u8, 128, 128, 255].repeat(4)).unwrap();
//! let out = ordered_dither(&buf, 2, BayerMatrix::Size2).unwrap();
//! assert_eq!(out.get_pixel(0, 0), Some([255, 255, 255, 255]));
//! assert_eq!(out.get_pixel(1, 0), Some([0, 0, 0, 255]));
//! ```

pub mod apply;

// Re-export core types (primary data structures used everywhere)
pub use pixkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixkit_color as color;
pub use pixkit_filter as filter;
pub use pixkit_io as io;

pub use apply::{
    ApplyError, ApplyResult, apply_curve_file, apply_grayscale_file, apply_kernel_file,
};
