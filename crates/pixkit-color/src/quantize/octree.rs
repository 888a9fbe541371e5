//! Octree quantization
//!
//! Each color descends one level per bit plane, from the most significant
//! bit down, choosing the child `(r_bit << 2) | (g_bit << 1) | b_bit`.
//! Leaves sit at a fixed depth and accumulate the colors that reach them.
//! When there are more leaves than palette slots, the least populated
//! leaves are discarded.

use super::{Palette, check_color_count, remap_to_palette};
use crate::{ColorError, ColorResult};
use pixkit_core::{PixelBuffer, Rgb};
use tracing::debug;

/// Deepest supported tree (one level per bit of an 8-bit channel).
pub const MAX_DEPTH: u32 = 8;

/// Options for [`octree_quantize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctreeOptions {
    /// Palette size (2..=256)
    pub num_colors: u32,
    /// Leaf depth (1..=8)
    pub depth: u32,
}

impl Default for OctreeOptions {
    fn default() -> Self {
        OctreeOptions {
            num_colors: 16,
            depth: MAX_DEPTH,
        }
    }
}

impl OctreeOptions {
    pub fn new(num_colors: u32) -> Self {
        OctreeOptions {
            num_colors,
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

#[derive(Debug, Default)]
struct OctreeNode {
    children: [Option<Box<OctreeNode>>; 8],
    count: u64,
    r_sum: u64,
    g_sum: u64,
    b_sum: u64,
}

impl OctreeNode {
    fn average(&self) -> Rgb {
        Rgb::new(
            (self.r_sum / self.count) as u8,
            (self.g_sum / self.count) as u8,
            (self.b_sum / self.count) as u8,
        )
    }
}

#[inline]
fn child_index(color: Rgb, level: u32) -> usize {
    let shift = 7 - level;
    let bit = |v: u8| ((v >> shift) & 1) as usize;
    (bit(color.r) << 2) | (bit(color.g) << 1) | bit(color.b)
}

/// Incremental octree color quantizer
///
/// # Examples
///
/// ```
/// use pixkit_color::OctreeQuantizer;
/// use pixkit_core::Rgb;
///
/// let mut tree = OctreeQuantizer::new(8).unwrap();
/// tree.add_color(Rgb::new(255, 0, 0));
/// tree.add_color(Rgb::new(255, 0, 0));
/// tree.add_color(Rgb::new(0, 0, 255));
/// assert_eq!(tree.leaf_count(), 2);
/// assert_eq!(tree.palette(2).len(), 2);
/// ```
#[derive(Debug)]
pub struct OctreeQuantizer {
    root: OctreeNode,
    depth: u32,
    leaves: usize,
}

impl OctreeQuantizer {
    /// Create an empty tree whose leaves sit at `depth`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidParameters`] unless `1 <= depth <= 8`.
    pub fn new(depth: u32) -> ColorResult<Self> {
        if !(1..=MAX_DEPTH).contains(&depth) {
            return Err(ColorError::InvalidParameters(format!(
                "octree depth must be between 1 and {MAX_DEPTH}, got {depth}"
            )));
        }
        Ok(OctreeQuantizer {
            root: OctreeNode::default(),
            depth,
            leaves: 0,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of distinct leaves reached so far.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Route one color to its leaf.
    pub fn add_color(&mut self, color: Rgb) {
        let mut node = &mut self.root;
        for level in 0..self.depth {
            let slot = &mut node.children[child_index(color, level)];
            if slot.is_none() && level + 1 == self.depth {
                self.leaves += 1;
            }
            node = slot.get_or_insert_with(Box::default).as_mut();
        }
        node.count += 1;
        node.r_sum += color.r as u64;
        node.g_sum += color.g as u64;
        node.b_sum += color.b as u64;
    }

    /// Add every pixel of a buffer.
    pub fn add_buffer(&mut self, buf: &PixelBuffer) {
        for color in buf.colors() {
            self.add_color(color);
        }
    }

    /// Leaves in depth-first child order.
    fn collect_leaves(&self) -> Vec<&OctreeNode> {
        fn walk<'a>(node: &'a OctreeNode, level: u32, depth: u32, out: &mut Vec<&'a OctreeNode>) {
            if level == depth {
                out.push(node);
                return;
            }
            for child in node.children.iter().flatten() {
                walk(child, level + 1, depth, out);
            }
        }

        let mut out = Vec::with_capacity(self.leaves);
        if self.leaves > 0 {
            walk(&self.root, 0, self.depth, &mut out);
        }
        out
    }

    /// Average colors of the `max_colors` most populated leaves.
    ///
    /// Leaves tied on population are dropped in depth-first order. The
    /// surviving leaves keep their depth-first order in the palette.
    pub fn palette(&self, max_colors: usize) -> Palette {
        let leaves = self.collect_leaves();
        let excess = leaves.len().saturating_sub(max_colors);

        let mut by_count: Vec<usize> = (0..leaves.len()).collect();
        by_count.sort_by_key(|&i| leaves[i].count);
        let mut keep = vec![true; leaves.len()];
        for &i in &by_count[..excess] {
            keep[i] = false;
        }

        leaves
            .iter()
            .zip(keep)
            .filter_map(|(leaf, k)| k.then(|| leaf.average()))
            .collect()
    }
}

/// Build an octree palette of at most `num_colors` colors.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for a color count outside
/// `2..=256` or a depth outside `1..=8`.
pub fn octree_palette(buf: &PixelBuffer, options: &OctreeOptions) -> ColorResult<Palette> {
    check_color_count("number of colors", options.num_colors)?;
    let mut tree = OctreeQuantizer::new(options.depth)?;
    tree.add_buffer(buf);
    let palette = tree.palette(options.num_colors as usize);
    debug!(
        depth = options.depth,
        leaves = tree.leaf_count(),
        colors = palette.len(),
        "octree palette"
    );
    Ok(palette)
}

/// Reduce the image to its octree palette.
pub fn octree_quantize(buf: &PixelBuffer, options: &OctreeOptions) -> ColorResult<PixelBuffer> {
    let palette = octree_palette(buf, options)?;
    remap_to_palette(buf, &palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_index() {
        let c = Rgb::new(0b1000_0000, 0b0100_0000, 0b1100_0000);
        assert_eq!(child_index(c, 0), 0b101);
        assert_eq!(child_index(c, 1), 0b011);
        assert_eq!(child_index(c, 2), 0);
    }

    #[test]
    fn test_full_depth_is_exact() {
        let mut tree = OctreeQuantizer::new(8).unwrap();
        for v in [10u8, 20, 20, 30] {
            tree.add_color(Rgb::gray(v));
        }
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(
            tree.palette(16).colors(),
            &[Rgb::gray(10), Rgb::gray(20), Rgb::gray(30)]
        );
    }

    #[test]
    fn test_least_populated_dropped() {
        let mut tree = OctreeQuantizer::new(8).unwrap();
        for v in [200u8, 200, 5, 100, 100, 100, 50] {
            tree.add_color(Rgb::gray(v));
        }
        // counts in depth-first order: 5:1, 50:1, 100:3, 200:2
        assert_eq!(
            tree.palette(2).colors(),
            &[Rgb::gray(100), Rgb::gray(200)]
        );
        // one of the two singletons goes; 5 comes first depth-first
        assert_eq!(
            tree.palette(3).colors(),
            &[Rgb::gray(50), Rgb::gray(100), Rgb::gray(200)]
        );
    }

    #[test]
    fn test_shallow_depth_averages() {
        let mut tree = OctreeQuantizer::new(1).unwrap();
        tree.add_color(Rgb::gray(0));
        tree.add_color(Rgb::gray(100));
        tree.add_color(Rgb::gray(200));
        // 0 and 100 share the low half, 200 is alone in the high half
        assert_eq!(tree.palette(8).colors(), &[Rgb::gray(50), Rgb::gray(200)]);
    }

    #[test]
    fn test_quantize_reproduces_few_colors() {
        let data: Vec<u8> = (0..24u8)
            .flat_map(|i| match i % 3 {
                0 => [0, 0, 255, 255],
                1 => [0, 255, 0, 255],
                _ => [255, 0, 0, 128],
            })
            .collect();
        let buf = PixelBuffer::from_bgra(6, 4, data).unwrap();
        let out = octree_quantize(&buf, &OctreeOptions::new(4)).unwrap();
        assert_eq!(out.data(), buf.data());
    }

    #[test]
    fn test_invalid_options() {
        assert!(OctreeQuantizer::new(0).is_err());
        assert!(OctreeQuantizer::new(9).is_err());
        let buf = PixelBuffer::new(1, 1).unwrap();
        assert!(octree_palette(&buf, &OctreeOptions::new(300)).is_err());
    }
}
