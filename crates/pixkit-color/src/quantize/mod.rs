//! Color quantization
//!
//! Palette-building quantizers reduce an image to at most `n` colors:
//!
//! - [`uniform_quantize`]: fixed per-channel grid, no palette search
//! - [`popularity_quantize`]: most populated histogram bins
//! - [`kmeans_quantize`]: Lloyd iterations from random seeds
//! - [`median_cut_quantize`]: recursive split on the widest channel
//! - [`octree_quantize`]: bit-plane octree, least-populated leaves dropped
//!
//! Every palette-based quantizer finishes with [`remap_to_palette`], so each
//! output pixel's color is a palette member. Alpha is passed through.

mod kmeans;
mod median_cut;
mod octree;
mod popularity;
mod uniform;

pub use kmeans::{KMeansOptions, kmeans_palette, kmeans_quantize};
pub use median_cut::{MedianCutOptions, median_cut_palette, median_cut_quantize};
pub use octree::{OctreeOptions, OctreeQuantizer, octree_palette, octree_quantize};
pub use popularity::{PopularityOptions, popularity_palette, popularity_quantize};
pub use uniform::{UniformOptions, uniform_quantize};

use crate::{ColorError, ColorResult};
use pixkit_core::color::{BLUE, GREEN, RED};
use pixkit_core::{PixelBuffer, Rgb};
use std::collections::HashMap;
use tracing::debug;

/// Largest supported palette size.
pub const MAX_COLORS: u32 = 256;

/// Reject a color or cluster count outside `2..=256`.
pub(crate) fn check_color_count(what: &str, n: u32) -> ColorResult<()> {
    if !(2..=MAX_COLORS).contains(&n) {
        return Err(ColorError::InvalidParameters(format!(
            "{what} must be between 2 and {MAX_COLORS}, got {n}"
        )));
    }
    Ok(())
}

/// An ordered list of colors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    pub fn new(colors: Vec<Rgb>) -> Self {
        Palette { colors }
    }

    /// The colors, in palette order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Nearest palette color; see [`nearest_color`].
    pub fn nearest(&self, color: Rgb) -> Option<Rgb> {
        nearest_color(color, &self.colors)
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgb> {
        self.colors.iter()
    }

    pub fn into_vec(self) -> Vec<Rgb> {
        self.colors
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Palette::new(colors)
    }
}

impl FromIterator<Rgb> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        Palette::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Palette entry with the smallest squared RGB distance to `color`.
///
/// Ties go to the earliest entry. Returns `None` for an empty palette.
pub fn nearest_color(color: Rgb, palette: &[Rgb]) -> Option<Rgb> {
    let mut best: Option<(u32, Rgb)> = None;
    for &p in palette {
        let d = color.distance_sq(p);
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, p));
            if d == 0 {
                break;
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Replace every pixel's color with its nearest palette entry.
///
/// # Errors
///
/// Returns [`ColorError::EmptyPalette`] if `palette` has no colors.
pub fn remap_to_palette(buf: &PixelBuffer, palette: &Palette) -> ColorResult<PixelBuffer> {
    if palette.is_empty() {
        return Err(ColorError::EmptyPalette);
    }
    debug!(width = buf.width(), height = buf.height(), colors = palette.len(), "remap");

    let mut cache: HashMap<Rgb, Rgb> = HashMap::new();
    let mut out = buf.to_mut();
    for px in out.pixels_mut() {
        let src = Rgb::new(px[RED], px[GREEN], px[BLUE]);
        let dst = *cache
            .entry(src)
            .or_insert_with(|| nearest_color(src, palette.colors()).unwrap_or(src));
        px[RED] = dst.r;
        px[GREEN] = dst.g;
        px[BLUE] = dst.b;
    }
    Ok(out.into())
}
