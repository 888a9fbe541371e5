//! K-means quantization
//!
//! Lloyd's algorithm over the image's distinct colors. Initial centroids are the first `k` distinct colors met
//! while visiting pixels in a random order, so results depend on the
//! supplied generator.

use super::{Palette, check_color_count, remap_to_palette};
use crate::{ColorError, ColorResult};
use pixkit_core::{PixelBuffer, Rgb};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Options for [`kmeans_quantize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansOptions {
    /// Number of clusters (2..=256)
    pub num_clusters: u32,
    /// Iteration cap (at least 1)
    pub max_iterations: u32,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        KMeansOptions {
            num_clusters: 8,
            max_iterations: 100,
        }
    }
}

impl KMeansOptions {
    pub fn new(num_clusters: u32) -> Self {
        KMeansOptions {
            num_clusters,
            ..Default::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Distinct colors in first-seen order.
fn distinct(colors: &[Rgb]) -> Vec<Rgb> {
    let mut seen = HashSet::new();
    colors.iter().copied().filter(|&c| seen.insert(c)).collect()
}

fn seed_centroids<R: Rng + ?Sized>(colors: &[Rgb], k: usize, rng: &mut R) -> Vec<Rgb> {
    let mut order: Vec<usize> = (0..colors.len()).collect();
    order.shuffle(rng);

    let mut seen = HashSet::new();
    let mut centroids = Vec::with_capacity(k);
    for i in order {
        if seen.insert(colors[i]) {
            centroids.push(colors[i]);
            if centroids.len() == k {
                break;
            }
        }
    }
    centroids
}

/// Index of the nearest centroid; the first wins ties.
fn nearest_index(color: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_d = u32::MAX;
    for (i, &c) in centroids.iter().enumerate() {
        let d = color.distance_sq(c);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

/// Cluster the image's colors and return the non-empty cluster centroids.
///
/// Iteration stops when no color changes cluster or after `max_iterations`
/// assignment passes. Each centroid is the mean of the distinct colors
/// assigned to it, truncated per channel; repeated pixels add no weight.
/// A cluster that loses all its members keeps its previous centroid while
/// iterating and is left out of the final palette.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for a cluster count outside
/// `2..=256` or a zero iteration cap.
pub fn kmeans_palette<R>(
    buf: &PixelBuffer,
    options: &KMeansOptions,
    rng: &mut R,
) -> ColorResult<Palette>
where
    R: Rng + ?Sized,
{
    check_color_count("number of clusters", options.num_clusters)?;
    if options.max_iterations == 0 {
        return Err(ColorError::InvalidParameters(
            "max iterations must be at least 1".to_string(),
        ));
    }

    let colors = buf.colors();
    let distinct_colors = distinct(&colors);
    let mut centroids = seed_centroids(&colors, options.num_clusters as usize, rng);
    let k = centroids.len();

    let mut assignment = vec![usize::MAX; distinct_colors.len()];
    let mut converged = false;
    let mut iterations = 0;
    while iterations < options.max_iterations {
        iterations += 1;

        let mut changed = false;
        for (slot, &color) in assignment.iter_mut().zip(&distinct_colors) {
            let nearest = nearest_index(color, &centroids);
            if *slot != nearest {
                *slot = nearest;
                changed = true;
            }
        }
        if !changed {
            converged = true;
            break;
        }

        let mut sums = vec![[0u64; 4]; k];
        for (&cluster, &color) in assignment.iter().zip(&distinct_colors) {
            let s = &mut sums[cluster];
            s[0] += color.r as u64;
            s[1] += color.g as u64;
            s[2] += color.b as u64;
            s[3] += 1;
        }
        for (centroid, s) in centroids.iter_mut().zip(&sums) {
            if s[3] > 0 {
                *centroid = Rgb::new(
                    (s[0] / s[3]) as u8,
                    (s[1] / s[3]) as u8,
                    (s[2] / s[3]) as u8,
                );
            }
        }
    }

    if !converged {
        warn!(iterations, "k-means stopped at the iteration cap before converging");
    }

    // final membership against the settled centroids
    let mut used = vec![false; k];
    for &color in &distinct_colors {
        used[nearest_index(color, &centroids)] = true;
    }
    let palette: Palette = centroids
        .into_iter()
        .zip(used)
        .filter_map(|(c, u)| u.then_some(c))
        .collect();
    debug!(iterations, converged, colors = palette.len(), "k-means palette");
    Ok(palette)
}

/// Reduce the image to its k-means palette.
pub fn kmeans_quantize<R>(
    buf: &PixelBuffer,
    options: &KMeansOptions,
    rng: &mut R,
) -> ColorResult<PixelBuffer>
where
    R: Rng + ?Sized,
{
    let palette = kmeans_palette(buf, options, rng)?;
    remap_to_palette(buf, &palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_color() -> PixelBuffer {
        let data: Vec<u8> = (0..16)
            .flat_map(|i| if i % 4 < 2 { [0, 0, 255, 255] } else { [255, 0, 0, 255] })
            .collect();
        PixelBuffer::from_bgra(4, 4, data).unwrap()
    }

    #[test]
    fn test_distinct_order() {
        let a = Rgb::gray(1);
        let b = Rgb::gray(2);
        assert_eq!(distinct(&[b, a, b, b]), vec![b, a]);
    }

    #[test]
    fn test_repeated_pixels_do_not_weight_centroids() {
        let mut data = Vec::new();
        for v in [0u8, 0, 0, 0, 0, 0, 0, 0, 0, 30, 255, 255] {
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let buf = PixelBuffer::from_bgra(12, 1, data).unwrap();
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let palette = kmeans_palette(&buf, &KMeansOptions::new(2), &mut rng).unwrap();
            assert_eq!(palette.len(), 2, "seed {seed}");
            assert!(palette.contains(Rgb::gray(15)), "seed {seed}: {palette:?}");
            assert!(palette.contains(Rgb::WHITE), "seed {seed}: {palette:?}");
        }
    }

    #[test]
    fn test_two_colors_recovered() {
        let buf = two_color();
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let palette = kmeans_palette(&buf, &KMeansOptions::new(2), &mut rng).unwrap();
            assert_eq!(palette.len(), 2);
            assert!(palette.contains(Rgb::new(255, 0, 0)));
            assert!(palette.contains(Rgb::new(0, 0, 255)));
        }
    }

    #[test]
    fn test_more_clusters_than_colors() {
        let buf = two_color();
        let mut rng = StdRng::seed_from_u64(3);
        let out = kmeans_quantize(&buf, &KMeansOptions::new(8), &mut rng).unwrap();
        assert_eq!(out.data(), buf.data());
    }

    #[test]
    fn test_single_iteration_cap() {
        let buf = two_color();
        let mut rng = StdRng::seed_from_u64(5);
        let opts = KMeansOptions::new(2).with_max_iterations(1);
        let palette = kmeans_palette(&buf, &opts, &mut rng).unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_invalid_options() {
        let buf = two_color();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(kmeans_palette(&buf, &KMeansOptions::new(1), &mut rng).is_err());
        assert!(
            kmeans_palette(&buf, &KMeansOptions::new(2).with_max_iterations(0), &mut rng).is_err()
        );
    }
}
