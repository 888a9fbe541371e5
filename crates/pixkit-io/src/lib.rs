//! pixkit-io - Persistence for images and filter definitions
//!
//! This crate reads and writes:
//!
//! - Raster images (PNG, JPEG, BMP, GIF) as BGRA [`PixelBuffer`]s
//! - Convolution kernel files (`.conv`)
//! - Tone-curve files (`.filter`) in point form and 256-entry table form
//! - Grayscale weight parameter files
//!
//! Reading a missing file fails with [`IoError::NotFound`]; unparsable
//! contents fail with [`IoError::MalformedData`].
//!
//! [`PixelBuffer`]: pixkit_core::PixelBuffer

pub mod curve;
mod error;
pub mod format;
pub mod kernel;
pub mod raster;
pub mod weights;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};

pub use curve::{
    ToneMap, read_tone_map, read_tone_map_from_reader, read_tone_map_from_str, write_lut,
    write_tone_curve, write_tone_map,
};
pub use kernel::{
    read_kernel, read_kernel_from_reader, read_kernel_from_str, write_kernel,
    write_kernel_to_string,
};
pub use raster::{
    read_image, read_image_from_bytes, write_image, write_image_format, write_image_to_bytes,
};
pub use weights::{
    read_grayscale_options, read_grayscale_options_or_default, write_grayscale_options,
};
