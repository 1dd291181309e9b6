//! Blend modes: the color space in which channel-wise interpolation happens.
//!
//! A color is converted once into a four-channel array `[c0, c1, c2, alpha]`
//! in the chosen space. For the hue-bearing spaces (`Hsv`, `Hcl`) the hue
//! occupies channel 0 and is interpolated along the shortest arc.

use crate::color::{
    hcl_to_srgb, hsv_to_srgb, lab_to_srgb, linear_to_srgb, luv_to_srgb, oklab_to_srgb,
    srgb_to_hcl, srgb_to_hsv, srgb_to_lab, srgb_to_linear, srgb_to_luv, srgb_to_oklab, Color,
    Hcl, Hsv, Lab, LinearRgb, Luv, OkLab,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Color space used for interpolation math.
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
pub enum BlendMode {
    #[default]
    Rgb,
    LinearRgb,
    Lab,
    Oklab,
    Hsv,
    Hcl,
    Luv,
}

/// Converts blend-space channels back to an sRGB [`Color`].
pub type FromChannels = fn([f64; 4]) -> Color;

impl BlendMode {
    /// Whether channel 0 is a hue angle in degrees.
    pub fn has_hue(self) -> bool {
        matches!(self, BlendMode::Hsv | BlendMode::Hcl)
    }

    /// Converts a color into this space's channel array.
    pub fn to_channels(self, c: Color) -> [f64; 4] {
        match self {
            BlendMode::Rgb => [c.r, c.g, c.b, c.a],
            BlendMode::LinearRgb => {
                let l = srgb_to_linear(c);
                [l.r, l.g, l.b, c.a]
            }
            BlendMode::Lab => {
                let l = srgb_to_lab(c);
                [l.l, l.a, l.b, c.a]
            }
            BlendMode::Oklab => {
                let l = srgb_to_oklab(c);
                [l.l, l.a, l.b, c.a]
            }
            BlendMode::Hsv => {
                let h = srgb_to_hsv(c);
                [h.h, h.s, h.v, c.a]
            }
            BlendMode::Hcl => {
                let h = srgb_to_hcl(c);
                [h.h, h.c, h.l, c.a]
            }
            BlendMode::Luv => {
                let l = srgb_to_luv(c);
                [l.l, l.u, l.v, c.a]
            }
        }
    }

    /// Saturation (HSV) or chroma (HCL, Lab units) at or below which a color
    /// has no meaningful hue. The HCL bound sits above the residual chroma
    /// that neutral greys keep under the D65 matrices.
    fn achromatic_threshold(self) -> f64 {
        match self {
            BlendMode::Hcl => 0.015,
            _ => 1e-10,
        }
    }

    /// Hue endpoints for blending channel array `a` into `b`.
    ///
    /// When exactly one side is achromatic it takes the other side's hue, so
    /// white, grey and black blend along the chromatic color's hue instead of
    /// sweeping from hue 0.
    pub fn hue_pair(self, a: &[f64; 4], b: &[f64; 4]) -> (f64, f64) {
        let threshold = self.achromatic_threshold();
        let (a_grey, b_grey) = (a[1] <= threshold, b[1] <= threshold);
        match (a_grey, b_grey) {
            (true, false) => (b[0], b[0]),
            (false, true) => (a[0], a[0]),
            _ => (a[0], b[0]),
        }
    }

    /// Selects the inverse conversion once, so evaluation does not branch on
    /// the mode per call.
    pub fn from_channels(self) -> FromChannels {
        match self {
            BlendMode::Rgb => rgb_from_channels,
            BlendMode::LinearRgb => linear_rgb_from_channels,
            BlendMode::Lab => lab_from_channels,
            BlendMode::Oklab => oklab_from_channels,
            BlendMode::Hsv => hsv_from_channels,
            BlendMode::Hcl => hcl_from_channels,
            BlendMode::Luv => luv_from_channels,
        }
    }
}

fn rgb_from_channels([r, g, b, a]: [f64; 4]) -> Color {
    Color::new(r, g, b, a)
}

fn linear_rgb_from_channels([r, g, b, a]: [f64; 4]) -> Color {
    linear_to_srgb(LinearRgb { r, g, b }).with_alpha(a)
}

fn lab_from_channels([l, x, y, a]: [f64; 4]) -> Color {
    lab_to_srgb(Lab { l, a: x, b: y }).with_alpha(a)
}

fn oklab_from_channels([l, x, y, a]: [f64; 4]) -> Color {
    oklab_to_srgb(OkLab { l, a: x, b: y }).with_alpha(a)
}

fn hsv_from_channels([h, s, v, a]: [f64; 4]) -> Color {
    hsv_to_srgb(Hsv { h, s, v }).with_alpha(a)
}

fn hcl_from_channels([h, c, l, a]: [f64; 4]) -> Color {
    hcl_to_srgb(Hcl { h, c, l }).with_alpha(a)
}

fn luv_from_channels([l, u, v, a]: [f64; 4]) -> Color {
    luv_to_srgb(Luv { l, u, v }).with_alpha(a)
}

/// Interpolates between two hue angles along the shorter arc.
///
/// The result is normalized to [0, 360).
pub fn interpolate_hue(a: f64, b: f64, t: f64) -> f64 {
    let delta = ((b - a).rem_euclid(360.0) + 540.0).rem_euclid(360.0) - 180.0;
    (a + t * delta + 360.0).rem_euclid(360.0)
}

/// Straight channel-wise RGB interpolation, alpha included.
pub fn interpolate_rgb(a: Color, b: Color, t: f64) -> Color {
    Color::new(
        a.r + t * (b.r - a.r),
        a.g + t * (b.g - a.g),
        a.b + t * (b.b - a.b),
        a.a + t * (b.a - a.a),
    )
}
