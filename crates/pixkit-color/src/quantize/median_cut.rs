//! Median-cut quantization
//!
//! Starting from one group holding every pixel's color, the largest group
//! that still contains more than one distinct color is split in two along
//! its widest channel until there are `num_colors` groups or nothing left
//! to split. Each group's mean becomes a palette entry.

use super::{Palette, check_color_count, remap_to_palette};
use crate::ColorResult;
use pixkit_core::{PixelBuffer, Rgb};
use tracing::debug;

/// Options for [`median_cut_quantize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianCutOptions {
    /// Palette size (2..=256)
    pub num_colors: u32,
}

impl Default for MedianCutOptions {
    fn default() -> Self {
        MedianCutOptions { num_colors: 16 }
    }
}

impl MedianCutOptions {
    pub fn new(num_colors: u32) -> Self {
        MedianCutOptions { num_colors }
    }
}

/// Channel with the largest value range (0 = red, 1 = green, 2 = blue).
/// Red wins ties over green, green over blue.
fn widest_channel(group: &[Rgb]) -> (usize, u8) {
    let mut best = (0, 0);
    for ch in 0..3 {
        let (lo, hi) = group
            .iter()
            .map(|c| c.channel(ch))
            .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let range = hi.saturating_sub(lo);
        if range > best.1 {
            best = (ch, range);
        }
    }
    best
}

/// Split a sorted group at the boundary between distinct channel values
/// nearest to its midpoint; the lower boundary wins ties.
fn split_index(sorted: &[Rgb], ch: usize) -> usize {
    let mid = sorted.len() / 2;
    let boundaries =
        (1..sorted.len()).filter(|&i| sorted[i - 1].channel(ch) != sorted[i].channel(ch));
    let mut best = 0;
    let mut best_dist = usize::MAX;
    for i in boundaries {
        let d = i.abs_diff(mid);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn mean(group: &[Rgb]) -> Rgb {
    let n = group.len() as u64;
    let (r, g, b) = group.iter().fold((0u64, 0u64, 0u64), |(r, g, b), c| {
        (r + c.r as u64, g + c.g as u64, b + c.b as u64)
    });
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

/// Build a median-cut palette of at most `num_colors` colors.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`](crate::ColorError::InvalidParameters)
/// for a color count outside `2..=256`.
pub fn median_cut_palette(buf: &PixelBuffer, options: &MedianCutOptions) -> ColorResult<Palette> {
    check_color_count("number of colors", options.num_colors)?;
    let target = options.num_colors as usize;

    let mut groups: Vec<Vec<Rgb>> = vec![buf.colors()];
    while groups.len() < target {
        // largest splittable group; the first wins ties
        let mut pick: Option<(usize, usize)> = None;
        for (i, g) in groups.iter().enumerate() {
            if widest_channel(g).1 > 0 && pick.is_none_or(|(_, len)| g.len() > len) {
                pick = Some((i, g.len()));
            }
        }
        let Some((i, _)) = pick else {
            break;
        };

        let mut group = std::mem::take(&mut groups[i]);
        let (ch, _) = widest_channel(&group);
        group.sort_by_key(|c| c.channel(ch));
        let upper = group.split_off(split_index(&group, ch));
        groups[i] = group;
        groups.push(upper);
    }

    let palette: Palette = groups.iter().map(|g| mean(g)).collect();
    debug!(groups = groups.len(), "median-cut palette");
    Ok(palette)
}

/// Reduce the image to its median-cut palette.
pub fn median_cut_quantize(
    buf: &PixelBuffer,
    options: &MedianCutOptions,
) -> ColorResult<PixelBuffer> {
    let palette = median_cut_palette(buf, options)?;
    remap_to_palette(buf, &palette)
}
