//! Synthetic test images
//!
//! All fixtures are fully opaque unless stated otherwise and are
//! deterministic for a given set of arguments.

use pixkit_core::{PixelBuffer, PixelBufferMut, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn build(w: u32, h: u32, mut f: impl FnMut(u32, u32) -> (Rgb, u8)) -> PixelBuffer {
    let mut m = match PixelBufferMut::new(w.max(1), h.max(1)) {
        Ok(m) => m,
        Err(e) => panic!("fixture dimensions {w}x{h}: {e}"),
    };
    for y in 0..m.height() {
        for x in 0..m.width() {
            let (c, a) = f(x, y);
            m.set_rgba_unchecked(x, y, c, a);
        }
    }
    m.into()
}

/// Smooth color gradient: red follows x, green follows y, blue follows x + y.
pub fn gradient(w: u32, h: u32) -> PixelBuffer {
    let wd = (w.max(2) - 1) as f64;
    let hd = (h.max(2) - 1) as f64;
    build(w, h, |x, y| {
        let r = (x as f64 * 255.0 / wd) as u8;
        let g = (y as f64 * 255.0 / hd) as u8;
        let b = ((x as f64 / wd + y as f64 / hd) * 127.5) as u8;
        (Rgb::new(r, g, b), 255)
    })
}

/// Horizontal gray ramp from 0 at the left to 255 at the right.
pub fn gray_ramp(w: u32, h: u32) -> PixelBuffer {
    let wd = (w.max(2) - 1) as f64;
    build(w, h, |x, _| (Rgb::gray((x as f64 * 255.0 / wd) as u8), 255))
}

/// Single color everywhere.
pub fn uniform(w: u32, h: u32, color: Rgb) -> PixelBuffer {
    build(w, h, |_, _| (color, 255))
}

/// Left half `left`, right half `right` (the right half gets the extra
/// column when the width is odd).
pub fn two_color(w: u32, h: u32, left: Rgb, right: Rgb) -> PixelBuffer {
    build(w, h, |x, _| (if x < w / 2 { left } else { right }, 255))
}

/// Eight vertical bands of primary and secondary colors plus black and white.
pub fn few_colors(w: u32, h: u32) -> PixelBuffer {
    const COLORS: [Rgb; 8] = [
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(0, 0, 255),
        Rgb::new(255, 255, 0),
        Rgb::new(255, 0, 255),
        Rgb::new(0, 255, 255),
        Rgb::new(0, 0, 0),
        Rgb::new(255, 255, 255),
    ];
    let w_eff = w.max(1);
    build(w, h, |x, _| {
        let band = (x as usize * COLORS.len()) / w_eff as usize;
        (COLORS[band.min(COLORS.len() - 1)], 255)
    })
}

/// Uniformly random colors from a seeded generator; alpha varies too.
pub fn noise(w: u32, h: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    build(w, h, |_, _| {
        let c = Rgb::new(rng.random(), rng.random(), rng.random());
        (c, rng.random())
    })
}

/// Random picks from a fixed color set, in equal expectation.
pub fn palette_noise(w: u32, h: u32, colors: &[Rgb], seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    build(w, h, |_, _| {
        let c = if colors.is_empty() {
            Rgb::BLACK
        } else {
            colors[rng.random_range(0..colors.len())]
        };
        (c, 255)
    })
}
