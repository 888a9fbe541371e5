//! PixelBuffer - The main raster container
//!
//! A `PixelBuffer` is a packed BGRA raster with a fixed stride of
//! `width * 4` bytes. Every transform in the workspace reads one buffer and
//! produces a new buffer of identical dimensions.
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for cheap cloning (shared ownership) and is
//! immutable. To build or modify pixel data, convert to `PixelBufferMut` via
//! [`PixelBuffer::try_into_mut`], [`PixelBuffer::to_mut`] or
//! [`PixelBuffer::create_template`], then convert back with `Into<PixelBuffer>`.

mod access;

use crate::color::BYTES_PER_PIXEL;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal buffer data
#[derive(Debug, Clone, PartialEq)]
struct BufferData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Horizontal resolution (dots per inch), carried for re-creation only
    dpi_x: f64,
    /// Vertical resolution (dots per inch)
    dpi_y: f64,
    /// BGRA bytes, `height * stride` long
    data: Vec<u8>,
}

impl BufferData {
    fn zeroed(width: u32, height: u32, dpi_x: f64, dpi_y: f64) -> Self {
        let len = height as usize * width as usize * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            dpi_x,
            dpi_y,
            data: vec![0u8; len],
        }
    }
}

/// Default resolution attached to new buffers.
pub const DEFAULT_DPI: f64 = 96.0;

/// Immutable BGRA raster.
///
/// # Examples
///
/// ```
/// use pixkit_core::PixelBuffer;
///
/// let buf = PixelBuffer::new(640, 480).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.stride(), 640 * 4);
/// assert_eq!(buf.data().len(), 480 * 640 * 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a new buffer with every byte set to zero (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(PixelBuffer {
            inner: Arc::new(BufferData::zeroed(width, height, DEFAULT_DPI, DEFAULT_DPI)),
        })
    }

    /// Wrap existing BGRA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSizeMismatch`] if `data.len() != height * width * 4`.
    pub fn from_bgra(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = height as usize * width as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            inner: Arc::new(BufferData {
                width,
                height,
                dpi_x: DEFAULT_DPI,
                dpi_y: DEFAULT_DPI,
                data,
            }),
        })
    }

    /// Build a buffer from RGBA-ordered bytes, swapping into BGRA.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        let mut data = rgba.to_vec();
        for px in data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
        Self::from_bgra(width, height, data)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * BYTES_PER_PIXEL
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Resolution as `(dpi_x, dpi_y)`.
    #[inline]
    pub fn dpi(&self) -> (f64, f64) {
        (self.inner.dpi_x, self.inner.dpi_y)
    }

    /// Get raw access to the BGRA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Iterate over pixels as 4-byte BGRA slices in raster order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.inner.data.chunks_exact(BYTES_PER_PIXEL)
    }

    /// Copy the pixel data out in RGBA order.
    pub fn to_rgba_vec(&self) -> Vec<u8> {
        let mut out = self.inner.data.clone();
        for px in out.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
        out
    }

    /// Check if two buffers have the same width and height.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Return a copy carrying a different resolution.
    pub fn with_dpi(&self, dpi_x: f64, dpi_y: f64) -> Self {
        let mut m = self.to_mut();
        m.set_dpi(dpi_x, dpi_y);
        m.into()
    }

    /// Create a zeroed mutable buffer with the same dimensions and resolution.
    ///
    /// This is the starting point of every transform's output.
    pub fn create_template(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: BufferData::zeroed(
                self.inner.width,
                self.inner.height,
                self.inner.dpi_x,
                self.inner.dpi_y,
            ),
        }
    }

    /// Get the number of strong references to this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to convert into a mutable buffer without copying.
    ///
    /// Succeeds only if this is the sole reference; otherwise returns `self`.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Ok(PixelBufferMut { inner }),
            Err(inner) => Err(PixelBuffer { inner }),
        }
    }

    /// Create a mutable deep copy.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable BGRA raster
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`PixelBuffer`] using `Into<PixelBuffer>`.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Create a zeroed mutable buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(PixelBufferMut {
            inner: BufferData::zeroed(width, height, DEFAULT_DPI, DEFAULT_DPI),
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * BYTES_PER_PIXEL
    }

    /// Resolution as `(dpi_x, dpi_y)`.
    #[inline]
    pub fn dpi(&self) -> (f64, f64) {
        (self.inner.dpi_x, self.inner.dpi_y)
    }

    /// Set both resolutions.
    pub fn set_dpi(&mut self, dpi_x: f64, dpi_y: f64) {
        self.inner.dpi_x = dpi_x;
        self.inner.dpi_y = dpi_y;
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.inner.data[start..start + stride]
    }

    /// Iterate mutably over pixels as 4-byte BGRA slices in raster order.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.inner.data.chunks_exact_mut(BYTES_PER_PIXEL)
    }

    /// Zero every byte.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(m: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: Arc::new(m.inner),
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}
