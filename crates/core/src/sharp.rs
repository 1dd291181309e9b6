//! Sharp (banded) gradients: a smooth gradient quantized into flat segments.

use crate::blend::interpolate_rgb;
use crate::color::Color;
use crate::gradient::Gradient;
use crate::interpolate::Interpolator;
use crate::stops::{linspace, locate};
use std::sync::Arc;

/// Flat bands joined by optional RGB transitions.
///
/// Every band color appears twice in `colors`, so segment `2k` is the flat
/// band `k` and segment `2k + 1` is the transition to band `k + 1`.
#[derive(Debug, Clone)]
pub struct SharpInterpolator {
    positions: Vec<f64>,
    colors: Vec<Color>,
}

impl SharpInterpolator {
    /// Lays out `bands.len()` equal bands over `[min, max]`. Each transition
    /// is `2 * smoothness * (max - min) / n / 4` wide, centered on the
    /// boundary between two bands. `smoothness` is clamped to [0, 1]; `NaN`
    /// counts as 0.
    pub fn new(bands: &[Color], min: f64, max: f64, smoothness: f64) -> Self {
        let n = bands.len();
        let colors: Vec<Color> = bands.iter().flat_map(|&c| [c, c]).collect();
        let smoothness = if smoothness.is_nan() {
            0.0
        } else {
            smoothness.clamp(0.0, 1.0)
        };
        let offset = smoothness * (max - min) / n as f64 / 4.0;
        let bounds = linspace(min, max, n + 1);

        let mut positions = Vec::with_capacity(colors.len());
        for j in 0..n {
            let start = if j > 0 { bounds[j] + offset } else { bounds[j] };
            let end = if j + 1 < n {
                bounds[j + 1] - offset
            } else {
                bounds[j + 1]
            };
            positions.push(start);
            positions.push(end);
        }
        Self { positions, colors }
    }
}

impl Interpolator for SharpInterpolator {
    fn interpolate(&self, t: f64) -> Color {
        let (i, t) = locate(&self.positions, t);
        if i % 2 == 0 {
            self.colors[i]
        } else {
            interpolate_rgb(self.colors[i], self.colors[i + 1], t)
        }
    }
}

impl Gradient {
    /// Quantizes the gradient into `segments` flat bands over the same domain.
    ///
    /// Band colors are sampled with [`colors`](Gradient::colors), so they are
    /// gamut-clamped. `smoothness` in [0, 1] widens the RGB transitions
    /// between bands; 0 gives hard edges. Fewer than two segments yield a
    /// constant gradient of the color at the domain minimum.
    pub fn sharp(&self, segments: usize, smoothness: f64) -> Gradient {
        let (min, max) = self.domain();
        if segments < 2 {
            return Gradient::constant(self.at(min), min, max);
        }
        let bands = self.colors(segments);
        let first = bands[0];
        let last = bands[bands.len() - 1];
        let interpolator = SharpInterpolator::new(&bands, min, max, smoothness);
        Gradient::from_parts(Arc::new(interpolator), min, max, first, last)
    }
}
