//! Color type and color-space conversion functions.
//!
//! [`Color`] is an sRGB color with straight alpha, stored as four `f64`
//! channels. Channels may leave [0, 1] while a gradient is being evaluated
//! (spline overshoot, out-of-gamut Lab/OKLab results); they are clamped only
//! at output boundaries such as [`Color::to_hex`] or [`Color::clamped`].
//!
//! The blending spaces (`LinearRgb`, `OkLab`, `Lab`, `Hcl`, `Luv`, `Hsv`) are
//! plain three-channel structs with pure conversion functions in both
//! directions. Each direction is written out on its own; none is derived by
//! inverting the other. CIE spaces use the D65 white point.

use crate::error::GradientError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with alpha.
///
/// `Default` is transparent black, which is also the value every gradient
/// returns for a `NaN` position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// CIE L*a*b*, with `l` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Cylindrical CIE L*a*b* (LCh(ab)), hue in degrees first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
    pub h: f64,
    pub c: f64,
    pub l: f64,
}

/// CIE L*u*v*, with `l` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Luv {
    pub l: f64,
    pub u: f64,
    pub v: f64,
}

/// Hue (degrees), saturation and value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from sRGB channels.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Returns the color with every channel clamped to [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Quantizes to 8 bits per channel, clamping first.
    ///
    /// `NaN` channels quantize to 0.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Parses a hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`, with or
    /// without the leading `#` (case insensitive).
    ///
    /// Returns `GradientError::InvalidColor` carrying the input on failure.
    pub fn from_hex(hex: &str) -> Result<Color, GradientError> {
        let invalid = || GradientError::InvalidColor(vec![hex.to_string()]);
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| -> Result<u8, GradientError> {
            u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| invalid())
        };
        let byte = |i: usize| -> Result<u8, GradientError> {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid())
        };
        let [r, g, b, a] = match digits.len() {
            3 | 4 => {
                let mut out = [255u8; 4];
                for (i, slot) in out.iter_mut().take(digits.len()).enumerate() {
                    *slot = nibble(i)? * 17;
                }
                out
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (i, slot) in out.iter_mut().take(digits.len() / 2).enumerate() {
                    *slot = byte(i * 2)?;
                }
                out
            }
            _ => return Err(invalid()),
        };
        Ok(Color::from_rgba8(r, g, b, a))
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when the quantized alpha is below 255.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = GradientError;

    /// Parses any CSS color: hex, named colors, `rgb()`, `hsl()`, `hwb()` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = csscolorparser::parse(s.trim())
            .map_err(|_| GradientError::InvalidColor(vec![s.to_string()]))?;
        Ok(Color::new(c.r as f64, c.g as f64, c.b as f64, c.a as f64))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// -- sRGB <-> linear --

/// sRGB gamma decode for a single channel.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c < 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma encode for a single channel.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma. Alpha is dropped.
pub fn srgb_to_linear(c: Color) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to opaque sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Color {
    Color::rgb(
        linear_component_to_srgb(c.r),
        linear_component_to_srgb(c.g),
        linear_component_to_srgb(c.b),
    )
}

// -- OKLab --

/// Converts linear RGB to OKLab via the LMS cube-root transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse transform (cube, inverse matrix).
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

pub fn srgb_to_oklab(c: Color) -> OkLab {
    linear_to_oklab(srgb_to_linear(c))
}

/// Result is not clamped; out-of-gamut OKLab values produce channels outside [0, 1].
pub fn oklab_to_srgb(c: OkLab) -> Color {
    linear_to_srgb(oklab_to_linear(c))
}

// -- CIE XYZ, Lab, LCh(ab), Luv --

const WHITE_D65: [f64; 3] = [0.95047, 1.00000, 1.08883];
const DELTA: f64 = 6.0 / 29.0;

fn linear_to_xyz(c: LinearRgb) -> [f64; 3] {
    [
        0.41239079926595948 * c.r + 0.35758433938387796 * c.g + 0.18048078840183429 * c.b,
        0.21263900587151036 * c.r + 0.71516867876775593 * c.g + 0.072192315360733715 * c.b,
        0.019330818715591851 * c.r + 0.11919477979462599 * c.g + 0.95053215224966058 * c.b,
    ]
}

fn xyz_to_linear([x, y, z]: [f64; 3]) -> LinearRgb {
    LinearRgb {
        r: 3.2409699419045214 * x - 1.5373831775700935 * y - 0.49861076029300328 * z,
        g: -0.96924363628087983 * x + 1.8759675015077207 * y + 0.041555057407175613 * z,
        b: 0.055630079696993609 * x - 0.20397695888897657 * y + 1.0569715142428786 * z,
    }
}

fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

pub fn srgb_to_lab(c: Color) -> Lab {
    let [x, y, z] = linear_to_xyz(srgb_to_linear(c));
    let fx = lab_f(x / WHITE_D65[0]);
    let fy = lab_f(y / WHITE_D65[1]);
    let fz = lab_f(z / WHITE_D65[2]);
    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

pub fn lab_to_srgb(c: Lab) -> Color {
    let fy = (c.l + 16.0) / 116.0;
    let fx = fy + c.a / 500.0;
    let fz = fy - c.b / 200.0;
    linear_to_srgb(xyz_to_linear([
        WHITE_D65[0] * lab_f_inv(fx),
        WHITE_D65[1] * lab_f_inv(fy),
        WHITE_D65[2] * lab_f_inv(fz),
    ]))
}

/// Converts Lab to its cylindrical form.
///
/// If chroma is below 1e-10 the hue is set to 0.0 rather than the
/// indeterminate `atan2(0, 0)`.
pub fn lab_to_hcl(c: Lab) -> Hcl {
    let chroma = (c.a * c.a + c.b * c.b).sqrt();
    let h = if chroma < 1e-10 {
        0.0
    } else {
        c.b.atan2(c.a).to_degrees().rem_euclid(360.0)
    };
    Hcl {
        h,
        c: chroma,
        l: c.l,
    }
}

pub fn hcl_to_lab(c: Hcl) -> Lab {
    let h_rad = c.h.to_radians();
    Lab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

pub fn srgb_to_hcl(c: Color) -> Hcl {
    lab_to_hcl(srgb_to_lab(c))
}

pub fn hcl_to_srgb(c: Hcl) -> Color {
    lab_to_srgb(hcl_to_lab(c))
}

/// Chromaticity (u', v') of an XYZ triple. Black maps to the white point.
fn uv_prime([x, y, z]: [f64; 3]) -> (f64, f64) {
    let den = x + 15.0 * y + 3.0 * z;
    if den == 0.0 {
        return uv_prime(WHITE_D65);
    }
    (4.0 * x / den, 9.0 * y / den)
}

pub fn srgb_to_luv(c: Color) -> Luv {
    let xyz = linear_to_xyz(srgb_to_linear(c));
    let yr = xyz[1] / WHITE_D65[1];
    let l = if yr > DELTA * DELTA * DELTA {
        116.0 * yr.cbrt() - 16.0
    } else {
        (29.0_f64 / 3.0).powi(3) * yr
    };
    let (up, vp) = uv_prime(xyz);
    let (un, vn) = uv_prime(WHITE_D65);
    Luv {
        l,
        u: 13.0 * l * (up - un),
        v: 13.0 * l * (vp - vn),
    }
}

pub fn luv_to_srgb(c: Luv) -> Color {
    if c.l <= 0.0 {
        return Color::rgb(0.0, 0.0, 0.0);
    }
    let (un, vn) = uv_prime(WHITE_D65);
    let up = c.u / (13.0 * c.l) + un;
    let vp = c.v / (13.0 * c.l) + vn;
    let y = if c.l > 8.0 {
        WHITE_D65[1] * ((c.l + 16.0) / 116.0).powi(3)
    } else {
        WHITE_D65[1] * c.l * (3.0_f64 / 29.0).powi(3)
    };
    if vp == 0.0 {
        return linear_to_srgb(xyz_to_linear([0.0, y, 0.0]));
    }
    let x = y * 9.0 * up / (4.0 * vp);
    let z = y * (12.0 - 3.0 * up - 20.0 * vp) / (4.0 * vp);
    linear_to_srgb(xyz_to_linear([x, y, z]))
}

// -- HSV --

/// Converts sRGB to HSV. Achromatic colors get hue 0.
pub fn srgb_to_hsv(c: Color) -> Hsv {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let d = max - min;
    let s = if max == 0.0 { 0.0 } else { d / max };
    let h = if d == 0.0 {
        0.0
    } else if max == c.r {
        60.0 * ((c.g - c.b) / d).rem_euclid(6.0)
    } else if max == c.g {
        60.0 * ((c.b - c.r) / d + 2.0)
    } else {
        60.0 * ((c.r - c.g) / d + 4.0)
    };
    Hsv {
        h: h.rem_euclid(360.0),
        s,
        v: max,
    }
}

pub fn hsv_to_srgb(c: Hsv) -> Color {
    let h = c.h.rem_euclid(360.0) / 60.0;
    let chroma = c.v * c.s;
    let x = chroma * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = c.v - chroma;
    let (r, g, b) = match h.floor() as i64 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Color::rgb(r + m, g + m, b + m)
}
