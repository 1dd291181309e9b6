//! Interpolators: per-channel value reconstruction inside a segment.
//!
//! Every interpolator works on blend-space channel arrays converted once at
//! construction. Spline interpolators reduce each segment of each channel to
//! cubic coefficients up front, so evaluation is a lookup plus a polynomial.

use crate::blend::{interpolate_hue, BlendMode, FromChannels};
use crate::color::Color;
use crate::stops::{locate, StopList};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use strum::{Display, EnumString, VariantNames};

/// Interpolation method between stops.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Centripetal Catmull-Rom (alpha 0.5, tension 0).
    CatmullRom,
    /// Uniform cubic B-spline.
    Basis,
}

/// Evaluates a gradient strictly inside its domain.
///
/// [`Gradient`](crate::Gradient) resolves `NaN` and out-of-domain positions
/// itself, so implementations only see `min < t < max`.
pub trait Interpolator: Debug + Send + Sync {
    fn interpolate(&self, t: f64) -> Color;
}

/// Coefficients `[a, b, c, d]` of `a*t^3 + b*t^2 + c*t + d` over local `t` in [0, 1].
pub type Cubic = [f64; 4];

pub fn eval_cubic(&[a, b, c, d]: &Cubic, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    a * t3 + b * t2 + c * t + d
}

/// Pads `values` with one phantom point at each end by linear extrapolation:
/// `2*v[0] - v[1]` in front and `2*v[n-1] - v[n-2]` behind.
fn with_phantoms(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut padded = Vec::with_capacity(n + 2);
    padded.push(2.0 * values[0] - values[1]);
    padded.extend_from_slice(values);
    padded.push(2.0 * values[n - 1] - values[n - 2]);
    padded
}

/// Centripetal Catmull-Rom coefficients for each of the `n - 1` segments.
///
/// Knot spacing uses `|v_i - v_j|^0.5`. A tangent that comes out `NaN`
/// (coincident control values) is replaced by 0.
pub fn catmull_rom_segments(values: &[f64]) -> Vec<Cubic> {
    const ALPHA: f64 = 0.5;
    const TENSION: f64 = 0.0;

    with_phantoms(values)
        .windows(4)
        .map(|w| {
            let (v0, v1, v2, v3) = (w[0], w[1], w[2], w[3]);
            let t0 = 0.0;
            let t1 = t0 + (v0 - v1).abs().powf(ALPHA);
            let t2 = t1 + (v1 - v2).abs().powf(ALPHA);
            let t3 = t2 + (v2 - v3).abs().powf(ALPHA);

            let m1 = (1.0 - TENSION)
                * (t2 - t1)
                * ((v0 - v1) / (t0 - t1) - (v0 - v2) / (t0 - t2) + (v1 - v2) / (t1 - t2));
            let m2 = (1.0 - TENSION)
                * (t2 - t1)
                * ((v1 - v2) / (t1 - t2) - (v1 - v3) / (t1 - t3) + (v2 - v3) / (t2 - t3));
            let m1 = if m1.is_nan() { 0.0 } else { m1 };
            let m2 = if m2.is_nan() { 0.0 } else { m2 };

            [
                2.0 * v1 - 2.0 * v2 + m1 + m2,
                -3.0 * v1 + 3.0 * v2 - 2.0 * m1 - m2,
                m1,
                v1,
            ]
        })
        .collect()
}

/// Straight-line coefficients `[0, 0, v2 - v1, v1]` for each segment.
pub fn linear_segments(values: &[f64]) -> Vec<Cubic> {
    values
        .windows(2)
        .map(|w| [0.0, 0.0, w[1] - w[0], w[0]])
        .collect()
}

/// Uniform cubic B-spline blend of four control values.
pub fn basis(t: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    ((1.0 - 3.0 * t + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// [`basis`] expanded into per-segment cubic coefficients.
pub fn basis_segments(values: &[f64]) -> Vec<Cubic> {
    with_phantoms(values)
        .windows(4)
        .map(|w| {
            let (v0, v1, v2, v3) = (w[0], w[1], w[2], w[3]);
            [
                (-v0 + 3.0 * v1 - 3.0 * v2 + v3) / 6.0,
                (3.0 * v0 - 6.0 * v1 + 3.0 * v2) / 6.0,
                (-3.0 * v0 + 3.0 * v2) / 6.0,
                (v0 + 4.0 * v1 + v2) / 6.0,
            ]
        })
        .collect()
}

/// Channel arrays of every stop in `mode`'s space.
fn convert_stops(stops: &StopList, mode: BlendMode) -> Vec<[f64; 4]> {
    stops.colors().iter().map(|&c| mode.to_channels(c)).collect()
}

/// Hue endpoints of every segment, or `None` when `mode` has no hue channel.
fn segment_hues(channels: &[[f64; 4]], mode: BlendMode) -> Option<Vec<(f64, f64)>> {
    mode.has_hue().then(|| {
        channels
            .windows(2)
            .map(|w| mode.hue_pair(&w[0], &w[1]))
            .collect()
    })
}

/// Piecewise-linear interpolation in a blend space.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    positions: Vec<f64>,
    channels: Vec<[f64; 4]>,
    hues: Option<Vec<(f64, f64)>>,
    from_channels: FromChannels,
}

impl LinearInterpolator {
    pub fn new(stops: &StopList, mode: BlendMode) -> Self {
        let channels = convert_stops(stops, mode);
        Self {
            positions: stops.positions().to_vec(),
            hues: segment_hues(&channels, mode),
            channels,
            from_channels: mode.from_channels(),
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, t: f64) -> Color {
        let (i, t) = locate(&self.positions, t);
        let a = &self.channels[i];
        let b = &self.channels[i + 1];
        let mut out = [0.0; 4];
        for (k, v) in out.iter_mut().enumerate() {
            *v = a[k] + t * (b[k] - a[k]);
        }
        if let Some(hues) = &self.hues {
            let (h0, h1) = hues[i];
            out[0] = interpolate_hue(h0, h1, t);
        }
        (self.from_channels)(out)
    }
}

/// Piecewise-cubic interpolation with precomputed coefficients per segment
/// and channel.
///
/// In hue-bearing spaces the hue channel follows the shortest arc between
/// the segment's end hues instead of the spline; an achromatic end takes the
/// hue of the other end.
#[derive(Debug, Clone)]
pub struct SplineInterpolator {
    positions: Vec<f64>,
    segments: Vec<[Cubic; 4]>,
    hues: Option<Vec<(f64, f64)>>,
    from_channels: FromChannels,
}

impl SplineInterpolator {
    /// `Linear` yields degree-one coefficients, matching [`LinearInterpolator`].
    pub fn new(stops: &StopList, mode: BlendMode, kind: Interpolation) -> Self {
        let channels = convert_stops(stops, mode);
        let build: fn(&[f64]) -> Vec<Cubic> = match kind {
            Interpolation::Linear => linear_segments,
            Interpolation::CatmullRom => catmull_rom_segments,
            Interpolation::Basis => basis_segments,
        };

        let per_channel: Vec<Vec<Cubic>> = (0..4)
            .map(|k| {
                let values: Vec<f64> = channels.iter().map(|c| c[k]).collect();
                build(&values)
            })
            .collect();
        let segments = (0..channels.len() - 1)
            .map(|i| {
                [
                    per_channel[0][i],
                    per_channel[1][i],
                    per_channel[2][i],
                    per_channel[3][i],
                ]
            })
            .collect();

        Self {
            positions: stops.positions().to_vec(),
            segments,
            hues: segment_hues(&channels, mode),
            from_channels: mode.from_channels(),
        }
    }
}

impl Interpolator for SplineInterpolator {
    fn interpolate(&self, t: f64) -> Color {
        let (i, t) = locate(&self.positions, t);
        let seg = &self.segments[i];
        let mut out = [
            eval_cubic(&seg[0], t),
            eval_cubic(&seg[1], t),
            eval_cubic(&seg[2], t),
            eval_cubic(&seg[3], t),
        ];
        if let Some(hues) = &self.hues {
            let (h0, h1) = hues[i];
            out[0] = interpolate_hue(h0, h1, t);
        }
        (self.from_channels)(out)
    }
}

/// Same color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct ConstantInterpolator(pub Color);

impl Interpolator for ConstantInterpolator {
    fn interpolate(&self, _t: f64) -> Color {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn catmull_rom_passes_through_interior_values() {
        let values = [0.0, 1.0, 0.25, 0.8];
        let segs = catmull_rom_segments(&values);
        assert_eq!(segs.len(), 3);
        for (i, seg) in segs.iter().enumerate() {
            assert!(approx_eq(eval_cubic(seg, 0.0), values[i]));
            assert!(approx_eq(eval_cubic(seg, 1.0), values[i + 1]));
        }
    }

    #[test]
    fn catmull_rom_with_two_values_is_a_line() {
        let segs = catmull_rom_segments(&[0.2, 0.9]);
        for t in [0.0, 0.1, 0.33, 0.5, 0.77, 1.0] {
            let v = eval_cubic(&segs[0], t);
            assert!(approx_eq(v, 0.2 + t * 0.7), "t={t}: {v}");
        }
    }

    #[test]
    fn catmull_rom_coincident_values_give_zero_tangents() {
        let segs = catmull_rom_segments(&[0.5, 0.5, 0.5]);
        for seg in &segs {
            assert_eq!(*seg, [0.0, 0.0, 0.0, 0.5]);
        }
    }

    #[test]
    fn basis_segments_match_the_blend_formula() {
        let values = [0.1, 0.7, 0.3, 0.9, 0.2];
        let padded = with_phantoms(&values);
        let segs = basis_segments(&values);
        for (i, seg) in segs.iter().enumerate() {
            for t in [0.0, 0.25, 0.6, 1.0] {
                let expected = basis(t, padded[i], padded[i + 1], padded[i + 2], padded[i + 3]);
                assert!(approx_eq(eval_cubic(seg, t), expected), "seg {i} t={t}");
            }
        }
    }

    #[test]
    fn basis_endpoints_are_exact() {
        let values = [0.1, 0.7, 0.3];
        let segs = basis_segments(&values);
        assert!(approx_eq(eval_cubic(&segs[0], 0.0), 0.1));
        assert!(approx_eq(eval_cubic(&segs[1], 1.0), 0.3));
    }

    #[test]
    fn basis_approximates_interior_values() {
        let segs = basis_segments(&[0.0, 1.0, 0.0]);
        let peak = eval_cubic(&segs[0], 1.0);
        assert!(peak < 1.0 && peak > 0.5, "peak {peak}");
    }

    #[test]
    fn basis_with_two_values_is_a_line() {
        let segs = basis_segments(&[0.2, 0.9]);
        assert!(approx_eq(segs[0][0], 0.0));
        assert!(approx_eq(segs[0][1], 0.0));
        assert!(approx_eq(segs[0][2], 0.7));
        assert!(approx_eq(segs[0][3], 0.2));
    }

    #[test]
    fn interpolation_parses_from_snake_case_names() {
        assert_eq!(
            Interpolation::from_str("catmull_rom").unwrap(),
            Interpolation::CatmullRom
        );
        assert_eq!(Interpolation::Basis.to_string(), "basis");
        assert_eq!(Interpolation::VARIANTS, ["linear", "catmull_rom", "basis"]);
    }

    #[test]
    fn hue_channel_follows_the_short_arc_in_splines() {
        let stops = StopList::new(
            &[Color::rgb(1.0, 0.0, 0.2), Color::rgb(1.0, 0.2, 0.0)],
            &[],
        )
        .unwrap();
        let spline = SplineInterpolator::new(&stops, BlendMode::Hsv, Interpolation::Basis);
        let mid = spline.interpolate(0.5);
        assert!(mid.r > 0.99, "expected red through the short arc, got {mid:?}");
        assert!(mid.b < 0.01 && mid.g < 0.01, "got {mid:?}");
    }

    #[test]
    fn white_to_blue_in_hsv_stays_blue() {
        let stops = StopList::new(
            &[Color::rgb(1.0, 1.0, 1.0), Color::rgb(0.0, 0.0, 1.0)],
            &[],
        )
        .unwrap();
        let linear = LinearInterpolator::new(&stops, BlendMode::Hsv);
        assert_eq!(linear.interpolate(0.5).to_hex(), "#8080ff");
        let spline = SplineInterpolator::new(&stops, BlendMode::Hsv, Interpolation::CatmullRom);
        assert_eq!(spline.interpolate(0.5).to_hex(), "#8080ff");
    }

    #[test]
    fn grey_to_blue_in_hcl_keeps_the_blue_hue() {
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let stops = StopList::new(&[Color::rgb(0.5, 0.5, 0.5), blue], &[]).unwrap();
        let blue_hue = BlendMode::Hcl.to_channels(blue)[0];
        let interpolators: [Box<dyn Interpolator>; 2] = [
            Box::new(LinearInterpolator::new(&stops, BlendMode::Hcl)),
            Box::new(SplineInterpolator::new(
                &stops,
                BlendMode::Hcl,
                Interpolation::Basis,
            )),
        ];
        for interpolator in &interpolators {
            for t in [0.25, 0.5, 0.75] {
                let c = interpolator.interpolate(t);
                let hue = BlendMode::Hcl.to_channels(c)[0];
                assert!((hue - blue_hue).abs() < 1e-6, "t={t}: hue {hue} vs {blue_hue}");
                assert!(c.b > c.r && c.b > c.g, "t={t}: {c:?}");
            }
        }
    }

    #[test]
    fn linear_spline_matches_linear_interpolator() {
        let stops = StopList::new(
            &[
                Color::rgb(0.9, 0.1, 0.1),
                Color::rgb(0.2, 0.8, 0.3),
                Color::rgb(0.1, 0.2, 0.9),
                Color::rgb(0.7, 0.7, 0.0),
            ],
            &[],
        )
        .unwrap();
        for mode in [BlendMode::Rgb, BlendMode::Oklab, BlendMode::Hsv] {
            let linear = LinearInterpolator::new(&stops, mode);
            let spline = SplineInterpolator::new(&stops, mode, Interpolation::Linear);
            for i in 1..30 {
                let t = i as f64 / 30.0;
                let (a, b) = (linear.interpolate(t), spline.interpolate(t));
                assert!(
                    approx_eq(a.r, b.r) && approx_eq(a.g, b.g) && approx_eq(a.b, b.b),
                    "{mode} t={t}: {a:?} vs {b:?}"
                );
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn catmull_rom_is_finite_and_interpolating(
                values in proptest::collection::vec(-1.0_f64..2.0, 2..10),
                t in 0.0_f64..=1.0,
            ) {
                let segs = catmull_rom_segments(&values);
                for (i, seg) in segs.iter().enumerate() {
                    prop_assert!(eval_cubic(seg, t).is_finite());
                    prop_assert!((eval_cubic(seg, 0.0) - values[i]).abs() < 1e-9);
                    prop_assert!((eval_cubic(seg, 1.0) - values[i + 1]).abs() < 1e-9);
                }
            }

            #[test]
            fn basis_is_continuous_across_segments(
                values in proptest::collection::vec(-1.0_f64..2.0, 3..10),
            ) {
                let segs = basis_segments(&values);
                for w in segs.windows(2) {
                    prop_assert!((eval_cubic(&w[0], 1.0) - eval_cubic(&w[1], 0.0)).abs() < 1e-9);
                }
            }
        }
    }
}
