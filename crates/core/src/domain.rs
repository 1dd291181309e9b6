//! Spread modes: how positions outside `[min, max]` map back into the domain.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

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
pub enum SpreadMode {
    /// Pin to the nearest boundary color.
    #[default]
    Clamp,
    /// Tile periodically with period `max - min`.
    Repeat,
    /// Mirror back and forth with period `2 * (max - min)`.
    Reflect,
}

impl SpreadMode {
    /// Maps `t` into `[min, max]`.
    ///
    /// `Clamp` returns `t` unchanged; the gradient's own bounds check pins it.
    /// `NaN` stays `NaN`.
    pub fn map(self, t: f64, min: f64, max: f64) -> f64 {
        match self {
            SpreadMode::Clamp => t,
            SpreadMode::Repeat => min + repeat_unit(norm(t, min, max)) * (max - min),
            SpreadMode::Reflect => min + reflect_unit(norm(t, min, max)) * (max - min),
        }
    }
}

/// `(t - min) / (max - min)`.
fn norm(t: f64, min: f64, max: f64) -> f64 {
    (t - min) / (max - min)
}

/// Wraps a normalized coordinate into [0, 1).
fn repeat_unit(u: f64) -> f64 {
    (u.rem_euclid(1.0) + 1.0).rem_euclid(1.0)
}

/// Folds a normalized coordinate into [0, 1] as a triangle wave.
fn reflect_unit(u: f64) -> f64 {
    ((1.0 + u).rem_euclid(2.0) - 1.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn clamp_is_identity() {
        assert_eq!(SpreadMode::Clamp.map(5.0, 0.0, 1.0), 5.0);
    }

    #[test]
    fn repeat_wraps_into_domain() {
        let m = SpreadMode::Repeat;
        assert!(approx_eq(m.map(1.25, 0.0, 1.0), 0.25));
        assert!(approx_eq(m.map(-0.25, 0.0, 1.0), 0.75));
        assert!(approx_eq(m.map(7.0, 2.0, 4.0), 3.0));
        assert!(approx_eq(m.map(1.0, 0.0, 1.0), 0.0));
    }

    #[test]
    fn reflect_mirrors_at_the_bounds() {
        let m = SpreadMode::Reflect;
        assert!(approx_eq(m.map(1.25, 0.0, 1.0), 0.75));
        assert!(approx_eq(m.map(-0.25, 0.0, 1.0), 0.25));
        assert!(approx_eq(m.map(-1.0, 0.0, 1.0), 1.0));
        assert!(approx_eq(m.map(1.0, 0.0, 1.0), 1.0));
        assert!(approx_eq(m.map(2.0, 0.0, 1.0), 0.0));
        assert!(approx_eq(m.map(0.0, 0.0, 1.0), 0.0));
    }

    #[test]
    fn nan_passes_through() {
        assert!(SpreadMode::Repeat.map(f64::NAN, 0.0, 1.0).is_nan());
        assert!(SpreadMode::Reflect.map(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn parses_from_names() {
        assert_eq!("reflect".parse::<SpreadMode>().unwrap(), SpreadMode::Reflect);
        assert_eq!(SpreadMode::VARIANTS, ["clamp", "repeat", "reflect"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn repeat_stays_in_domain(t in -1e6_f64..1e6, min in -10.0_f64..10.0, width in 0.01_f64..10.0) {
                let max = min + width;
                let m = SpreadMode::Repeat.map(t, min, max);
                prop_assert!(m >= min - 1e-9 && m <= max + 1e-9, "{m} outside [{min}, {max}]");
            }

            #[test]
            fn reflect_stays_in_domain(t in -1e6_f64..1e6, min in -10.0_f64..10.0, width in 0.01_f64..10.0) {
                let max = min + width;
                let m = SpreadMode::Reflect.map(t, min, max);
                prop_assert!(m >= min - 1e-9 && m <= max + 1e-9, "{m} outside [{min}, {max}]");
            }
        }
    }
}
