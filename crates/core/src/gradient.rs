//! The gradient engine and its builder.
//!
//! A [`GradientBuilder`] collects colors, positions, a blend mode and an
//! interpolation method, validates them into a [`StopList`] and freezes the
//! result into an immutable [`Gradient`]. All precomputation (blend-space
//! conversion, spline coefficients) happens in `build()`.

use crate::blend::BlendMode;
use crate::color::Color;
use crate::css::parse_stops;
use crate::domain::SpreadMode;
use crate::error::GradientError;
use crate::interpolate::{
    ConstantInterpolator, Interpolation, Interpolator, LinearInterpolator, SplineInterpolator,
};
use crate::stops::{linspace, Stop, StopList};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// An immutable color gradient over the domain `[min, max]`.
///
/// Cloning is cheap (the interpolator is shared), and a gradient can be read
/// from many threads at once. Evaluation never fails: a `NaN` position yields
/// transparent black, positions at or beyond the bounds yield the boundary
/// colors.
#[derive(Debug, Clone)]
pub struct Gradient {
    interpolator: Arc<dyn Interpolator>,
    min: f64,
    max: f64,
    first: Color,
    last: Color,
}

impl Default for Gradient {
    /// The zero gradient: domain [0, 1], transparent black everywhere.
    fn default() -> Self {
        Self::constant(Color::TRANSPARENT, 0.0, 1.0)
    }
}

impl Gradient {
    /// Freezes a stop list into a gradient.
    pub fn new(stops: &StopList, mode: BlendMode, interpolation: Interpolation) -> Self {
        let interpolator: Arc<dyn Interpolator> = match interpolation {
            Interpolation::Linear => Arc::new(LinearInterpolator::new(stops, mode)),
            Interpolation::CatmullRom | Interpolation::Basis => {
                Arc::new(SplineInterpolator::new(stops, mode, interpolation))
            }
        };
        let (min, max) = stops.domain();
        Self::from_parts(interpolator, min, max, stops.first_color(), stops.last_color())
    }

    /// A gradient that evaluates to `color` everywhere on `[min, max]`.
    pub fn constant(color: Color, min: f64, max: f64) -> Self {
        Self::from_parts(Arc::new(ConstantInterpolator(color)), min, max, color, color)
    }

    pub(crate) fn from_parts(
        interpolator: Arc<dyn Interpolator>,
        min: f64,
        max: f64,
        first: Color,
        last: Color,
    ) -> Self {
        Self {
            interpolator,
            min,
            max,
            first,
            last,
        }
    }

    /// Color at `t`, clamping out-of-domain positions to the boundary colors.
    ///
    /// The result is not gamut-clamped.
    pub fn at(&self, t: f64) -> Color {
        if t.is_nan() {
            return Color::TRANSPARENT;
        }
        if t <= self.min {
            return self.first;
        }
        if t >= self.max {
            return self.last;
        }
        self.interpolator.interpolate(t)
    }

    /// Color at `t` after mapping it into the domain with `spread`.
    pub fn spread_at(&self, t: f64, spread: SpreadMode) -> Color {
        self.at(spread.map(t, self.min, self.max))
    }

    /// Color at `t`, tiling the gradient periodically.
    pub fn repeat_at(&self, t: f64) -> Color {
        self.spread_at(t, SpreadMode::Repeat)
    }

    /// Color at `t`, mirroring the gradient back and forth.
    pub fn reflect_at(&self, t: f64) -> Color {
        self.spread_at(t, SpreadMode::Reflect)
    }

    /// `n` evenly spaced, gamut-clamped colors across `[min, max]` inclusive.
    ///
    /// `n == 1` yields the color at `min`.
    pub fn colors(&self, n: usize) -> Vec<Color> {
        linspace(self.min, self.max, n)
            .into_iter()
            .map(|t| self.at(t).clamped())
            .collect()
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Assembles a [`Gradient`].
///
/// Colors accumulate across calls; positions, mode and interpolation are
/// replaced. Invalid color tokens are collected and reported together by
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct GradientBuilder {
    colors: Vec<Color>,
    positions: Vec<f64>,
    css_stops: Option<Result<Vec<Stop>, GradientError>>,
    mode: BlendMode,
    interpolation: Interpolation,
    invalid_colors: Vec<String>,
}

impl GradientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors.extend(colors);
        self
    }

    /// Appends colors parsed from CSS color strings.
    pub fn css_colors<S: AsRef<str>>(mut self, colors: impl IntoIterator<Item = S>) -> Self {
        for s in colors {
            match Color::from_str(s.as_ref()) {
                Ok(c) => self.colors.push(c),
                Err(_) => self.invalid_colors.push(s.as_ref().to_string()),
            }
        }
        self
    }

    /// Sets the stops from a CSS gradient stop list such as
    /// `"red, 25%, #00f 50% 60%, white"`, replacing any colors.
    ///
    /// Positions from the string live in [0, 1]; a two-value
    /// [`domain`](Self::domain) rescales them.
    pub fn css(mut self, s: &str) -> Self {
        self.css_stops = Some(parse_stops(s));
        self
    }

    /// Positions: none, two bounds, or one per color.
    pub fn domain(mut self, positions: &[f64]) -> Self {
        self.positions = positions.to_vec();
        self
    }

    pub fn mode(mut self, mode: BlendMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Validates the input and freezes it into a gradient.
    ///
    /// With no colors the gradient runs from black to white. On error,
    /// `build().unwrap_or_default()` gives the zero gradient.
    pub fn build(self) -> Result<Gradient, GradientError> {
        let (mode, interpolation) = (self.mode, self.interpolation);
        let result = self.stop_list().map(|stops| {
            debug!(
                stops = stops.len(),
                %mode,
                %interpolation,
                "built gradient"
            );
            Gradient::new(&stops, mode, interpolation)
        });
        if let Err(e) = &result {
            warn!(error = %e, "gradient build failed");
        }
        result
    }

    fn stop_list(self) -> Result<StopList, GradientError> {
        if !self.invalid_colors.is_empty() {
            return Err(GradientError::InvalidColor(self.invalid_colors));
        }

        if let Some(parsed) = self.css_stops {
            let mut stops = parsed?;
            match *self.positions {
                [] => {}
                [min, max] if min < max => {
                    for s in &mut stops {
                        s.position = min + s.position * (max - min);
                    }
                }
                [min, max] => return Err(GradientError::DegenerateDomain { min, max }),
                _ => {
                    return Err(GradientError::InvalidDomain(format!(
                        "a CSS gradient takes 0 or 2 domain values, got {}",
                        self.positions.len()
                    )))
                }
            }
            return StopList::from_stops(stops);
        }

        let colors = if self.colors.is_empty() {
            vec![Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 1.0, 1.0)]
        } else {
            self.colors
        };
        StopList::new(&colors, &self.positions)
    }
}
