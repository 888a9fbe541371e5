//! Dithering regression test
//!
//! Checks output levels, reproducibility with a seeded generator, the
//! Bayer 2x2 checkerboard on mid gray, and that error diffusion keeps the
//! mean brightness close to the source.

use pixkit_color::{
    BayerMatrix, DiffusionFilter, average_dither, error_diffusion_dither, ordered_dither,
    random_dither,
};
use pixkit_core::color::{BLUE, GREEN, RED, luma_f64};
use pixkit_core::{PixelBuffer, Rgb};
use pixkit_test::{RegParams, fixtures};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn mean_luma(buf: &PixelBuffer) -> f64 {
    let sum: f64 = buf.pixels().map(|p| luma_f64(p[RED], p[GREEN], p[BLUE])).sum();
    sum / buf.pixel_count() as f64
}

fn mean_red(buf: &PixelBuffer) -> f64 {
    let sum: u64 = buf.pixels().map(|p| p[RED] as u64).sum();
    sum as f64 / buf.pixel_count() as f64
}

fn levels_ok(buf: &PixelBuffer, levels: &[u8]) -> bool {
    buf.pixels()
        .all(|p| [RED, GREEN, BLUE].iter().all(|&c| levels.contains(&p[c])))
}

fn is_monochrome(buf: &PixelBuffer) -> bool {
    buf.pixels().all(|p| p[RED] == p[GREEN] && p[GREEN] == p[BLUE])
}

#[test]
fn dither_reg() {
    let mut rp = RegParams::new("dither");

    let gradient = fixtures::gradient(64, 48);
    let ramp = fixtures::gray_ramp(64, 16);

    // --- random ---
    let a = random_dither(&gradient, 4, &mut StdRng::seed_from_u64(11)).unwrap();
    let b = random_dither(&gradient, 4, &mut StdRng::seed_from_u64(11)).unwrap();
    rp.compare_buffers(&a, &b);
    rp.check(levels_ok(&a, &[0, 85, 170, 255]), "random dither levels");
    rp.write_buffer(&a).unwrap();

    // --- average ---
    let avg = average_dither(&gradient, 2).unwrap();
    rp.check(levels_ok(&avg, &[0, 255]), "average dither levels");
    rp.write_buffer(&avg).unwrap();

    // --- ordered ---
    let mid = fixtures::uniform(2, 2, Rgb::gray(128));
    let checker = ordered_dither(&mid, 2, BayerMatrix::Size2).unwrap();
    let expected = PixelBuffer::from_bgra(
        2,
        2,
        [[255u8, 255, 255, 255], [0, 0, 0, 255], [0, 0, 0, 255], [255, 255, 255, 255]].concat(),
    )
    .unwrap();
    rp.compare_buffers(&checker, &expected);

    for matrix in BayerMatrix::ALL {
        let out = ordered_dither(&gradient, 2, matrix).unwrap();
        rp.check(is_monochrome(&out), "ordered dither is monochrome");
        rp.check(levels_ok(&out, &[0, 255]), "ordered dither levels");
        rp.write_buffer(&out).unwrap();
    }
    rp.check(ordered_dither(&gradient, 1, BayerMatrix::Size4).is_err(), "one shade rejected");
    rp.check(BayerMatrix::from_size(5).is_err(), "5x5 matrix rejected");

    // --- error diffusion ---
    let source_mean = mean_luma(&ramp);
    let gray100 = fixtures::uniform(32, 32, Rgb::gray(100));
    for filter in DiffusionFilter::ALL {
        let out = error_diffusion_dither(&ramp, 2, filter).unwrap();
        rp.check(is_monochrome(&out), "error diffusion is monochrome");
        rp.check(levels_ok(&out, &[0, 255]), "error diffusion levels");
        rp.write_buffer(&out).unwrap();

        let flat = error_diffusion_dither(&gray100, 2, filter).unwrap();
        if filter == DiffusionFilter::Atkinson {
            // a quarter of the error is discarded, so only a loose bound holds
            rp.compare_values(100.0, mean_red(&flat), 10.0);
        } else {
            rp.compare_values(source_mean, mean_red(&out), 3.0);
            rp.compare_values(100.0, mean_red(&flat), 3.0);
        }
    }

    assert!(rp.cleanup(), "dither regression test failed");
}
