//! pixkit-color - Dithering and color quantization
//!
//! This crate reduces the number of distinct colors in a BGRA [`PixelBuffer`]:
//!
//! - **Dithering** ([`dither`]): random, average, ordered (Bayer) and
//!   error-diffusion dithering to `n` evenly spaced shades
//! - **Quantization** ([`quantize`]): uniform, popularity, k-means,
//!   median-cut and octree quantizers, plus nearest-color palette remapping
//!
//! Algorithms that need randomness take a caller-supplied [`rand::Rng`], so
//! seeded generators give reproducible output.
//!
//! [`PixelBuffer`]: pixkit_core::PixelBuffer

pub mod dither;
mod error;
pub mod quantize;

pub use error::{ColorError, ColorResult};

// Re-export dithering functions
pub use dither::{
    BayerMatrix, DiffusionFilter, average_dither, error_diffusion_dither, ordered_dither,
    quantize_to_step, random_dither, step_for_shades,
};

// Re-export quantization functions
pub use quantize::{
    KMeansOptions, MedianCutOptions, OctreeOptions, OctreeQuantizer, Palette, PopularityOptions,
    UniformOptions, kmeans_palette, kmeans_quantize, median_cut_palette, median_cut_quantize,
    nearest_color, octree_palette, octree_quantize, popularity_palette, popularity_quantize,
    remap_to_palette, uniform_quantize,
};
