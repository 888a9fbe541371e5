//! Rank filter regression test
//!
//! Median, min and max filters on synthetic images: size 1 is the
//! identity, flat fields are unchanged, and min <= median <= max holds
//! per channel.

use pixkit_core::{PixelBuffer, Rgb};
use pixkit_core::color::{BLUE, GREEN, RED};
use pixkit_filter::{max_filter, median_filter, min_filter, rank_filter};
use pixkit_test::{RegParams, fixtures};

#[test]
fn rank_reg() {
    let mut rp = RegParams::new("rank");

    let src = fixtures::noise(33, 21, 8);

    // --- size 1 is the identity ---
    for rank in [0.0f32, 0.5, 1.0] {
        let out = rank_filter(&src, 1, rank).unwrap();
        rp.compare_buffers(&src, &out);
    }

    // --- flat field is unchanged ---
    let flat = fixtures::uniform(9, 9, Rgb::new(12, 34, 56));
    for size in [3, 5, 7] {
        rp.compare_buffers(&flat, &median_filter(&flat, size).unwrap());
    }

    // --- ordering of min, median, max ---
    for size in [3u32, 5] {
        let lo = min_filter(&src, size).unwrap();
        let mid = median_filter(&src, size).unwrap();
        let hi = max_filter(&src, size).unwrap();
        let ordered = lo
            .pixels()
            .zip(mid.pixels())
            .zip(hi.pixels())
            .all(|((a, b), c)| {
                [RED, GREEN, BLUE]
                    .iter()
                    .all(|&ch| a[ch] <= b[ch] && b[ch] <= c[ch])
            });
        rp.check(ordered, "min <= median <= max");
        rp.check(
            src.pixels().zip(mid.pixels()).all(|(a, b)| a[3] == b[3]),
            "alpha preserved",
        );
        rp.write_buffer(&mid).unwrap();
    }

    // --- median removes an isolated spike ---
    let mut spiky = fixtures::uniform(7, 7, Rgb::gray(40)).to_mut();
    spiky.set_rgba(3, 3, Rgb::WHITE, 255).unwrap();
    let spiky: PixelBuffer = spiky.into();
    let cleaned = median_filter(&spiky, 3).unwrap();
    rp.compare_values(40.0, cleaned.get_rgb(3, 3).map_or(0, |c| c.r) as f64, 0.0);

    // --- invalid parameters ---
    rp.check(median_filter(&src, 4).is_err(), "even size rejected");
    rp.check(median_filter(&src, 0).is_err(), "zero size rejected");
    rp.check(rank_filter(&src, 3, 1.5).is_err(), "rank above 1 rejected");
    rp.check(median_filter(&src, 65_537).is_err(), "oversized window rejected");

    assert!(rp.cleanup(), "rank regression test failed");
}
