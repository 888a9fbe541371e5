//! Image format detection
//!
//! Formats are detected from the magic number at the start of the data when
//! reading, and from the file extension when writing.

use crate::{IoError, IoResult};
use std::path::Path;

/// Raster formats handled by [`crate::read_image`] and [`crate::write_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
}

impl ImageFormat {
    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
        }
    }

    /// Look up a format by extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "bmp" => Some(ImageFormat::Bmp),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// Format implied by a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                IoError::UnsupportedFormat(format!("cannot infer format from {}", path.display()))
            })
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// GIF87a
    pub const GIF87A: &[u8] = b"GIF87a";

    /// GIF89a
    pub const GIF89A: &[u8] = b"GIF89a";
}

/// Detect image format from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::UnsupportedFormat(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }
    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }
    if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
        return Ok(ImageFormat::Gif);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}
