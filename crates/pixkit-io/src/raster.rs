//! Raster image reading and writing
//!
//! Decodes PNG, JPEG, BMP and GIF files into BGRA [`PixelBuffer`]s and
//! encodes them back. Decoded images are expanded to 8-bit RGBA first, so
//! grayscale, paletted and 16-bit sources all arrive as BGRA8. JPEG output
//! drops alpha.

use crate::error::open;
use crate::{ImageFormat, IoError, IoResult, detect_format_from_bytes};
use pixkit_core::PixelBuffer;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;
use tracing::debug;

/// Read an image file into a BGRA buffer.
///
/// # Errors
///
/// Returns [`IoError::NotFound`] if the file does not exist,
/// [`IoError::UnsupportedFormat`] for unknown contents and
/// [`IoError::Image`] if decoding fails.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let mut data = Vec::new();
    BufReader::new(open(path)?).read_to_end(&mut data)?;
    let buf = read_image_from_bytes(&data)?;
    debug!(path = %path.display(), width = buf.width(), height = buf.height(), "read image");
    Ok(buf)
}

/// Decode an in-memory image into a BGRA buffer.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    let img = image::load_from_memory_with_format(data, format.to_image_format())?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_rgba(width, height, rgba.as_raw())?)
}

/// Write a buffer to a file, choosing the format from the extension.
pub fn write_image<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    write_image_format(buf, path, format)
}

/// Write a buffer to a file in an explicit format.
pub fn write_image_format<P: AsRef<Path>>(
    buf: &PixelBuffer,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let bytes = write_image_to_bytes(buf, format)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;
    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Encode a buffer into memory.
pub fn write_image_to_bytes(buf: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(buf.width(), buf.height(), buf.to_rgba_vec())
        .ok_or_else(|| IoError::UnsupportedFormat("buffer does not match its dimensions".into()))?;
    let img = image::DynamicImage::ImageRgba8(rgba);
    let img = match format {
        ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format.to_image_format())?;
    Ok(out.into_inner())
}
