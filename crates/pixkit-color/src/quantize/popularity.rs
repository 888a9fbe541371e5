//! Popularity quantization
//!
//! The RGB cube is divided into `subdivisions³` bins. The most populated
//! bins each contribute their most frequent exact color to the palette.
//!
//! Ranking bins rather than exact colors keeps one dominant hue from
//! crowding out the rest. A blue sky made of many near-identical blues fills
//! a single bin and takes one palette slot, leaving the other slots for the
//! remaining hues instead of spending them all on shades of blue.

use super::{Palette, check_color_count, remap_to_palette};
use crate::{ColorError, ColorResult};
use pixkit_core::{PixelBuffer, Rgb};
use std::collections::HashMap;
use tracing::debug;

/// Options for [`popularity_quantize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularityOptions {
    /// Palette size (2..=256)
    pub num_colors: u32,
    /// Bins per channel (1..=256)
    pub subdivisions: u32,
}

impl Default for PopularityOptions {
    fn default() -> Self {
        PopularityOptions {
            num_colors: 16,
            subdivisions: 8,
        }
    }
}

impl PopularityOptions {
    pub fn new(num_colors: u32) -> Self {
        PopularityOptions {
            num_colors,
            ..Default::default()
        }
    }

    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }
}

#[derive(Default)]
struct Bin {
    count: u64,
    colors: Vec<(Rgb, u64)>,
    index: HashMap<Rgb, usize>,
}

impl Bin {
    fn add(&mut self, color: Rgb) {
        self.count += 1;
        match self.index.get(&color) {
            Some(&i) => self.colors[i].1 += 1,
            None => {
                self.index.insert(color, self.colors.len());
                self.colors.push((color, 1));
            }
        }
    }

    /// Most frequent color; the first seen wins ties.
    fn dominant(&self) -> Option<Rgb> {
        let mut best: Option<(Rgb, u64)> = None;
        for &(color, count) in &self.colors {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((color, count));
            }
        }
        best.map(|(color, _)| color)
    }
}

/// Build a palette of up to `num_colors` colors from the most populated bins.
///
/// Bins are ranked by pixel count, ties broken by the order in which they
/// were first encountered in row-major order. Images with fewer occupied
/// bins yield a smaller palette.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for a color count outside
/// `2..=256` or a subdivision count outside `1..=256`.
pub fn popularity_palette(buf: &PixelBuffer, options: &PopularityOptions) -> ColorResult<Palette> {
    check_color_count("number of colors", options.num_colors)?;
    let sub = options.subdivisions;
    if !(1..=256).contains(&sub) {
        return Err(ColorError::InvalidParameters(format!(
            "subdivisions must be between 1 and 256, got {sub}"
        )));
    }

    let bin_of = |v: u8| v as u32 * sub / 256;
    let mut bins: Vec<Bin> = Vec::new();
    let mut lookup: HashMap<(u32, u32, u32), usize> = HashMap::new();
    for color in buf.colors() {
        let key = (bin_of(color.r), bin_of(color.g), bin_of(color.b));
        let i = *lookup.entry(key).or_insert_with(|| {
            bins.push(Bin::default());
            bins.len() - 1
        });
        bins[i].add(color);
    }

    let mut order: Vec<usize> = (0..bins.len()).collect();
    order.sort_by(|&a, &b| bins[b].count.cmp(&bins[a].count));

    let palette: Palette = order
        .into_iter()
        .take(options.num_colors as usize)
        .filter_map(|i| bins[i].dominant())
        .collect();
    debug!(bins = bins.len(), colors = palette.len(), "popularity palette");
    Ok(palette)
}

/// Reduce the image to its popularity palette.
pub fn popularity_quantize(
    buf: &PixelBuffer,
    options: &PopularityOptions,
) -> ColorResult<PixelBuffer> {
    let palette = popularity_palette(buf, options)?;
    remap_to_palette(buf, &palette)
}
