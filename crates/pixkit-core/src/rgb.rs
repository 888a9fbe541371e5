//! RGB color triple
//!
//! [`Rgb`] is the unit of palette and clustering operations. Equality and
//! hashing compare the exact byte triple.

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color with all three channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Components as an `[r, g, b]` array.
    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Component by channel index (0 = red, 1 = green, 2 = blue).
    ///
    /// # Panics
    ///
    /// Panics if `channel > 2`.
    #[inline]
    pub fn channel(self, channel: usize) -> u8 {
        match channel {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => panic!("channel index out of range: {channel}"),
        }
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Perceptual luma (`0.299R + 0.587G + 0.114B`), truncated to a byte.
    #[inline]
    pub fn luma(self) -> u8 {
        crate::color::luma(self.r, self.g, self.b)
    }

    /// Luma as an unrounded floating-point value.
    #[inline]
    pub fn luma_f64(self) -> f64 {
        crate::color::luma_f64(self.r, self.g, self.b)
    }

    /// Integer mean of the three channels.
    #[inline]
    pub fn mean(self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Pack into `0x00RRGGBB`.
    #[inline]
    pub fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        assert_eq!(Rgb::BLACK.distance_sq(Rgb::WHITE), 3 * 255 * 255);
        assert_eq!(Rgb::new(1, 2, 3).distance_sq(Rgb::new(1, 2, 3)), 0);
        assert_eq!(Rgb::new(10, 0, 0).distance_sq(Rgb::new(0, 0, 4)), 116);
    }

    #[test]
    fn test_mean_and_luma() {
        assert_eq!(Rgb::new(30, 60, 90).mean(), 60);
        assert_eq!(Rgb::gray(10).luma(), 10);
        assert_eq!(Rgb::BLACK.luma(), 0);
    }

    #[test]
    fn test_pack() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack(), 0x123456);
    }
}
