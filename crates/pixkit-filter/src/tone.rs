//! Tone curves and lookup tables
//!
//! A [`ToneCurve`] is a piecewise-linear byte mapping defined by control
//! points; a [`Lut`] is the equivalent precomputed 256-entry table. Both map
//! the R, G and B channels independently through the same function and leave
//! alpha untouched.
//!
//! # See also
//!
//! Point-wise generators on [`Lut`]: [`Lut::invert`], [`Lut::brightness`],
//! [`Lut::contrast`], [`Lut::gamma`].

use crate::{FilterError, FilterResult};
use pixkit_core::PixelBuffer;
use pixkit_core::color::{BLUE, GREEN, RED};
use tracing::debug;

/// One `(input, output)` pair of a tone curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlPoint {
    pub input: u8,
    pub output: u8,
}

impl ControlPoint {
    pub const fn new(input: u8, output: u8) -> Self {
        ControlPoint { input, output }
    }
}

impl From<(u8, u8)> for ControlPoint {
    fn from((input, output): (u8, u8)) -> Self {
        ControlPoint { input, output }
    }
}

// ============================================================================
// ToneCurve
// ============================================================================

/// Piecewise-linear tone curve
///
/// Control points are kept sorted by input and always include inputs 0 and
/// 255. Points sharing an input are allowed when built from external data;
/// the first one listed wins during lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve {
    points: Vec<ControlPoint>,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::identity()
    }
}

impl ToneCurve {
    /// Build a curve from arbitrary points.
    ///
    /// Missing endpoints are synthesized as `(0, 0)` and `(255, 255)`, then
    /// the points are stably sorted by input.
    pub fn new<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ControlPoint>,
    {
        let mut points: Vec<ControlPoint> = points.into_iter().map(Into::into).collect();
        if !points.iter().any(|p| p.input == 0) {
            points.insert(0, ControlPoint::new(0, 0));
        }
        if !points.iter().any(|p| p.input == 255) {
            points.push(ControlPoint::new(255, 255));
        }
        points.sort_by_key(|p| p.input);
        ToneCurve { points }
    }

    /// The identity curve `[(0, 0), (255, 255)]`.
    pub fn identity() -> Self {
        ToneCurve {
            points: vec![ControlPoint::new(0, 0), ControlPoint::new(255, 255)],
        }
    }

    /// The inverting curve `[(0, 255), (255, 0)]`.
    pub fn inverted() -> Self {
        ToneCurve {
            points: vec![ControlPoint::new(0, 255), ControlPoint::new(255, 0)],
        }
    }

    /// Control points in ascending input order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Map one byte through the curve.
    ///
    /// The first interval `[p1.input, p2.input]` that contains `value` is
    /// used; the result is `p1.output + ratio * (p2.output - p1.output)`
    /// truncated toward zero. A degenerate interval yields `p1.output`.
    pub fn eval(&self, value: u8) -> u8 {
        for pair in self.points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            if value >= p1.input && value <= p2.input {
                if p1.input == p2.input {
                    return p1.output;
                }
                let ratio = (value - p1.input) as f64 / (p2.input - p1.input) as f64;
                let y = p1.output as f64 + ratio * (p2.output as f64 - p1.output as f64);
                return y as u8;
            }
        }
        value
    }

    /// Insert a control point, replacing any point with the same input.
    pub fn insert_point(&mut self, point: ControlPoint) {
        self.points.retain(|p| p.input != point.input);
        let pos = self.points.partition_point(|p| p.input < point.input);
        self.points.insert(pos, point);
    }

    /// Remove the control point at `input`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidCurve`] for the endpoints (0 and 255)
    /// and for inputs with no control point.
    pub fn remove_point(&mut self, input: u8) -> FilterResult<ControlPoint> {
        if input == 0 || input == 255 {
            return Err(FilterError::InvalidCurve(format!(
                "cannot remove endpoint at input {input}"
            )));
        }
        let pos = self
            .points
            .iter()
            .position(|p| p.input == input)
            .ok_or_else(|| FilterError::InvalidCurve(format!("no control point at input {input}")))?;
        Ok(self.points.remove(pos))
    }

    /// Precompute the curve as a lookup table.
    pub fn to_lut(&self) -> Lut {
        Lut::from_fn(|v| self.eval(v))
    }
}

// ============================================================================
// Lut
// ============================================================================

/// 256-entry byte lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lut {
    table: [u8; 256],
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lut {
    /// Build a table by evaluating `f` on every byte.
    pub fn from_fn<F: FnMut(u8) -> u8>(mut f: F) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Lut { table }
    }

    /// Wrap an existing table.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidCurve`] unless `values` has exactly 256 entries.
    pub fn from_slice(values: &[u8]) -> FilterResult<Self> {
        let table: [u8; 256] = values.try_into().map_err(|_| {
            FilterError::InvalidCurve(format!("lookup table needs 256 entries, got {}", values.len()))
        })?;
        Ok(Lut { table })
    }

    /// `v -> v`
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// `v -> 255 - v`
    pub fn invert() -> Self {
        Self::from_fn(|v| 255 - v)
    }

    /// `v -> clamp(v + offset)`
    pub fn brightness(offset: i32) -> Self {
        Self::from_fn(|v| (v as i32 + offset).clamp(0, 255) as u8)
    }

    /// `v -> clamp(round((v - 128) * factor + 128))`
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `factor` is negative or not finite.
    pub fn contrast(factor: f64) -> FilterResult<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "contrast factor must be finite and non-negative, got {factor}"
            )));
        }
        Ok(Self::from_fn(|v| {
            ((v as f64 - 128.0) * factor + 128.0).round().clamp(0.0, 255.0) as u8
        }))
    }

    /// `v -> round(255 * (v / 255) ^ (1 / gamma))`
    ///
    /// Values of `gamma` above 1 brighten midtones.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] unless `gamma` is finite and positive.
    pub fn gamma(gamma: f64) -> FilterResult<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "gamma must be finite and positive, got {gamma}"
            )));
        }
        let exponent = 1.0 / gamma;
        Ok(Self::from_fn(|v| {
            (255.0 * (v as f64 / 255.0).powf(exponent)).round().clamp(0.0, 255.0) as u8
        }))
    }

    /// Look up one byte.
    #[inline]
    pub fn get(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    /// The full table.
    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }

    /// Table equal to applying `self` and then `next`.
    pub fn then(&self, next: &Lut) -> Lut {
        Self::from_fn(|v| next.get(self.get(v)))
    }
}

impl From<&ToneCurve> for Lut {
    fn from(curve: &ToneCurve) -> Self {
        curve.to_lut()
    }
}

/// Map R, G and B of every pixel through a lookup table.
pub fn apply_lut(buf: &PixelBuffer, lut: &Lut) -> FilterResult<PixelBuffer> {
    let mut out = buf.to_mut();
    for px in out.pixels_mut() {
        px[BLUE] = lut.get(px[BLUE]);
        px[GREEN] = lut.get(px[GREEN]);
        px[RED] = lut.get(px[RED]);
    }
    Ok(out.into())
}

/// Map R, G and B of every pixel through a tone curve.
pub fn apply_tone_curve(buf: &PixelBuffer, curve: &ToneCurve) -> FilterResult<PixelBuffer> {
    debug!(points = curve.points().len(), "apply tone curve");
    apply_lut(buf, &curve.to_lut())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_synthesized() {
        let curve = ToneCurve::new([(128u8, 64u8)]);
        assert_eq!(
            curve.points(),
            &[
                ControlPoint::new(0, 0),
                ControlPoint::new(128, 64),
                ControlPoint::new(255, 255)
            ]
        );
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let curve = ToneCurve::new([(255u8, 0u8), (100, 50), (0, 255)]);
        let inputs: Vec<u8> = curve.points().iter().map(|p| p.input).collect();
        assert_eq!(inputs, vec![0, 100, 255]);
    }

    #[test]
    fn test_interpolation_truncates() {
        let curve = ToneCurve::new([(0u8, 0u8), (255, 100)]);
        // 100 * 3 / 255 = 1.176..
        assert_eq!(curve.eval(3), 1);
        assert_eq!(curve.eval(255), 100);
        assert_eq!(curve.eval(0), 0);
        assert_eq!(ToneCurve::identity().eval(77), 77);
        assert_eq!(ToneCurve::inverted().eval(55), 200);
    }

    #[test]
    fn test_duplicate_inputs_first_wins() {
        let curve = ToneCurve::new([(0u8, 0u8), (100, 10), (100, 200), (255, 255)]);
        assert_eq!(curve.eval(100), 10);
        // above the duplicate, the (100,200)-(255,255) segment applies
        assert_eq!(curve.eval(101), 200);
    }

    #[test]
    fn test_insert_and_remove_points() {
        let mut curve = ToneCurve::identity();
        curve.insert_point(ControlPoint::new(128, 10));
        curve.insert_point(ControlPoint::new(128, 20));
        assert_eq!(curve.points().len(), 3);
        assert_eq!(curve.eval(128), 20);

        assert!(curve.remove_point(0).is_err());
        assert!(curve.remove_point(255).is_err());
        assert!(curve.remove_point(7).is_err());
        assert_eq!(curve.remove_point(128).unwrap(), ControlPoint::new(128, 20));
        assert_eq!(curve, ToneCurve::identity());
    }

    #[test]
    fn test_curve_lut_matches_eval() {
        let curve = ToneCurve::new([(64u8, 200u8), (192, 30)]);
        let lut = curve.to_lut();
        for v in 0..=255u8 {
            assert_eq!(lut.get(v), curve.eval(v));
        }
    }

    #[test]
    fn test_generators() {
        assert_eq!(Lut::invert().get(0), 255);
        assert_eq!(Lut::brightness(30).get(240), 255);
        assert_eq!(Lut::brightness(-30).get(10), 0);
        assert_eq!(Lut::brightness(5).get(10), 15);
        assert_eq!(Lut::contrast(1.0).unwrap(), Lut::identity());
        assert_eq!(Lut::contrast(0.0).unwrap().get(3), 128);
        assert_eq!(Lut::gamma(1.0).unwrap(), Lut::identity());
        assert!(Lut::gamma(2.0).unwrap().get(64) > 64);
        assert!(Lut::gamma(0.0).is_err());
        assert!(Lut::contrast(f64::NAN).is_err());
        assert_eq!(Lut::invert().then(&Lut::invert()), Lut::identity());
    }

    #[test]
    fn test_lut_from_slice() {
        assert!(Lut::from_slice(&[0u8; 255]).is_err());
        let values: Vec<u8> = (0..=255u8).rev().collect();
        assert_eq!(Lut::from_slice(&values).unwrap(), Lut::invert());
    }

    #[test]
    fn test_apply_keeps_alpha() {
        let buf = PixelBuffer::from_bgra(2, 1, vec![0, 10, 20, 30, 255, 128, 1, 99]).unwrap();
        let out = apply_lut(&buf, &Lut::invert()).unwrap();
        assert_eq!(out.data(), &[255, 245, 235, 30, 0, 127, 254, 99]);
        let out = apply_tone_curve(&buf, &ToneCurve::identity()).unwrap();
        assert_eq!(out.data(), buf.data());
    }
}
