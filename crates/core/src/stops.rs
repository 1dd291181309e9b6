//! Stop lists: validated, ordered `(position, color)` anchors.
//!
//! A [`StopList`] is built once from raw colors and positions and is
//! immutable afterward. It owns the position lookup used by every
//! interpolator.

use crate::color::Color;
use crate::error::GradientError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stops whose combined distance to both neighbors is below this are dropped.
pub const ZERO_WIDTH_EPSILON: f64 = 1e-10;

/// A single `(position, color)` anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub position: f64,
    pub color: Color,
}

impl Stop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Ordered sequence of at least two stops with non-decreasing positions.
#[derive(Debug, Clone, PartialEq)]
pub struct StopList {
    positions: Vec<f64>,
    colors: Vec<Color>,
}

impl StopList {
    /// Builds a stop list from colors and zero, two or `colors.len()` positions.
    ///
    /// - no positions: colors are spread evenly over [0, 1]
    /// - `colors.len()` positions: used as given, must be non-decreasing
    /// - two positions: colors are spread evenly between them (`min < max`)
    ///
    /// A single color is duplicated into a constant two-stop list. Zero-width
    /// stops are then filtered (see [`filter_zero_width`]).
    pub fn new(colors: &[Color], positions: &[f64]) -> Result<Self, GradientError> {
        let colors: Vec<Color> = match colors {
            [] => return Err(GradientError::InsufficientStops(0)),
            [c] => vec![*c, *c],
            _ => colors.to_vec(),
        };

        let positions = if positions.is_empty() {
            linspace(0.0, 1.0, colors.len())
        } else if positions.len() == colors.len() {
            if let Some(i) = positions.windows(2).position(|w| !(w[0] <= w[1])) {
                return Err(GradientError::InvalidDomain(format!(
                    "position {} ({}) is bigger than the next position ({})",
                    i,
                    positions[i],
                    positions[i + 1]
                )));
            }
            positions.to_vec()
        } else if let [min, max] = *positions {
            if !(min < max) {
                return Err(GradientError::DegenerateDomain { min, max });
            }
            linspace(min, max, colors.len())
        } else {
            return Err(GradientError::InvalidDomain(format!(
                "expected 0, 2 or {} positions, got {}",
                colors.len(),
                positions.len()
            )));
        };

        let stops: Vec<Stop> = positions
            .into_iter()
            .zip(colors)
            .map(|(p, c)| Stop::new(p, c))
            .collect();
        Self::from_stops(stops)
    }

    /// Builds a stop list from already positioned stops.
    ///
    /// Positions must be non-decreasing. Zero-width stops are filtered.
    pub fn from_stops(stops: Vec<Stop>) -> Result<Self, GradientError> {
        if let Some(i) = stops
            .windows(2)
            .position(|w| !(w[0].position <= w[1].position))
        {
            return Err(GradientError::InvalidDomain(format!(
                "stop {} ({}) is bigger than the next stop ({})",
                i,
                stops[i].position,
                stops[i + 1].position
            )));
        }

        let before = stops.len();
        let stops = filter_zero_width(stops);
        if stops.len() != before {
            debug!(
                dropped = before - stops.len(),
                remaining = stops.len(),
                "filtered zero-width stops"
            );
        }
        if stops.len() < 2 {
            return Err(GradientError::InsufficientStops(stops.len()));
        }

        let (positions, colors): (Vec<f64>, Vec<Color>) =
            stops.into_iter().map(|s| (s.position, s.color)).unzip();
        Ok(Self { positions, colors })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn first_color(&self) -> Color {
        self.colors[0]
    }

    pub fn last_color(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    /// The domain `(min, max)` spanned by the stops.
    pub fn domain(&self) -> (f64, f64) {
        (self.positions[0], self.positions[self.positions.len() - 1])
    }

    pub fn stops(&self) -> impl Iterator<Item = Stop> + '_ {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(&p, &c)| Stop::new(p, c))
    }

    /// Returns the segment containing `t` with its local fraction in [0, 1].
    ///
    /// See [`locate`].
    pub fn locate(&self, t: f64) -> (usize, f64) {
        locate(&self.positions, t)
    }
}

/// Binary search for the segment `i` with `positions[i] <= t <= positions[i + 1]`,
/// returning `(i, local_t)`.
///
/// Callers handle `t` at or outside the domain bounds and `NaN` before
/// calling; inside the open domain the chosen segment always has non-zero
/// width, since `positions[i] < t <= positions[i + 1]`.
pub fn locate(positions: &[f64], t: f64) -> (usize, f64) {
    let upper = positions.partition_point(|&p| p < t).clamp(1, positions.len() - 1);
    let (p1, p2) = (positions[upper - 1], positions[upper]);
    let local = if p2 > p1 { (t - p1) / (p2 - p1) } else { 0.0 };
    (upper - 1, local)
}

/// Drops stop `i` when `(pos[i] - prev) + (next - pos[i])` is below
/// [`ZERO_WIDTH_EPSILON`], where `prev`/`next` are its neighbors' positions
/// (the stop's own position at either end).
///
/// Coincident runs keep their outermost members, so a pair of stops at the
/// same position still forms a hard edge.
pub fn filter_zero_width(stops: Vec<Stop>) -> Vec<Stop> {
    let Some(first) = stops.first() else {
        return stops;
    };
    let last = stops.len() - 1;
    let mut prev = first.position;
    let mut kept = Vec::with_capacity(stops.len());
    for (i, s) in stops.iter().enumerate() {
        let next = stops[(i + 1).min(last)].position;
        if (s.position - prev) + (next - s.position) >= ZERO_WIDTH_EPSILON {
            kept.push(*s);
        }
        prev = s.position;
    }
    kept
}

/// `n` evenly spaced values from `min` to `max` inclusive.
///
/// `n == 1` yields `[min]`.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![min];
    }
    let d = max - min;
    let l = n as f64 - 1.0;
    (0..n).map(|i| min + (i as f64 * d) / l).collect()
}
