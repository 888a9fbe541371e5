//! Pixel access functions
//!
//! Bounds-checked and unchecked getters/setters for individual pixels.
//! Coordinates are `(x, y)` with the origin at the top-left corner.

use super::{PixelBuffer, PixelBufferMut};
use crate::color::{ALPHA, BLUE, BYTES_PER_PIXEL, GREEN, RED};
use crate::error::{Error, Result};
use crate::rgb::Rgb;

#[inline]
fn offset(width: u32, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * BYTES_PER_PIXEL
}

impl PixelBuffer {
    /// Get the BGRA bytes at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the BGRA bytes without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> [u8; 4] {
        let i = offset(self.width(), x, y);
        let d = self.data();
        [d[i], d[i + 1], d[i + 2], d[i + 3]]
    }

    /// Get the color at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_pixel(x, y).map(|p| Rgb::new(p[RED], p[GREEN], p[BLUE]))
    }

    /// Get the color without bounds checking.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        let p = self.get_pixel_unchecked(x, y);
        Rgb::new(p[RED], p[GREEN], p[BLUE])
    }

    /// Get the alpha value at (x, y).
    pub fn get_alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.get_pixel(x, y).map(|p| p[ALPHA])
    }

    /// Collect every pixel's color in raster order.
    pub fn colors(&self) -> Vec<Rgb> {
        self.pixels()
            .map(|p| Rgb::new(p[RED], p[GREEN], p[BLUE]))
            .collect()
    }
}

impl PixelBufferMut {
    /// Get the BGRA bytes at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = offset(self.width(), x, y);
        let d = self.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// Set the BGRA bytes at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, bgra: [u8; 4]) -> Result<()> {
        self.check_bounds(x, y)?;
        self.set_pixel_unchecked(x, y, bgra);
        Ok(())
    }

    /// Set the BGRA bytes without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, bgra: [u8; 4]) {
        let i = offset(self.width(), x, y);
        self.data_mut()[i..i + BYTES_PER_PIXEL].copy_from_slice(&bgra);
    }

    /// Set color and alpha at (x, y).
    pub fn set_rgba(&mut self, x: u32, y: u32, color: Rgb, alpha: u8) -> Result<()> {
        self.set_pixel(x, y, [color.b, color.g, color.r, alpha])
    }

    /// Set color and alpha without bounds checking.
    #[inline]
    pub fn set_rgba_unchecked(&mut self, x: u32, y: u32, color: Rgb, alpha: u8) {
        self.set_pixel_unchecked(x, y, [color.b, color.g, color.r, alpha]);
    }

    /// Fill every pixel with the same color and alpha.
    pub fn fill(&mut self, color: Rgb, alpha: u8) {
        for px in self.pixels_mut() {
            px.copy_from_slice(&[color.b, color.g, color.r, alpha]);
        }
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut m = PixelBufferMut::new(4, 3).unwrap();
        m.set_rgba(2, 1, Rgb::new(10, 20, 30), 200).unwrap();
        assert_eq!(m.get_pixel(2, 1), Some([30, 20, 10, 200]));
        let buf: PixelBuffer = m.into();
        assert_eq!(buf.get_rgb(2, 1), Some(Rgb::new(10, 20, 30)));
        assert_eq!(buf.get_alpha(2, 1), Some(200));
        assert_eq!(buf.get_rgb(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut m = PixelBufferMut::new(2, 2).unwrap();
        assert!(m.set_pixel(2, 0, [0; 4]).is_err());
        assert!(m.set_pixel(0, 2, [0; 4]).is_err());
        assert_eq!(m.get_pixel(5, 5), None);
        let buf: PixelBuffer = m.into();
        assert_eq!(buf.get_pixel(2, 0), None);
    }

    #[test]
    fn test_fill_and_colors() {
        let mut m = PixelBufferMut::new(2, 2).unwrap();
        m.fill(Rgb::new(1, 2, 3), 255);
        let buf: PixelBuffer = m.into();
        assert_eq!(buf.colors(), vec![Rgb::new(1, 2, 3); 4]);
        assert!(buf.pixels().all(|p| p == [3, 2, 1, 255]));
    }
}
