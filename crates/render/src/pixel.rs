//! Pure-computation pixel buffer conversion from a [`Gradient`].
//!
//! The gradient runs left to right; every row is identical. Colors are
//! quantized with [`Color::to_rgba8`](colorramp_core::Color::to_rgba8), so
//! out-of-gamut values are clamped and alpha is kept.

use colorramp_core::stops::linspace;
use colorramp_core::{Gradient, SpreadMode};

/// Renders the gradient's own domain across `width` columns.
///
/// The buffer length is `width * height * 4`. Over the domain `Repeat` wraps
/// the last column back to the first color; use [`span_to_rgba`] to show
/// several periods.
pub fn gradient_to_rgba(
    gradient: &Gradient,
    width: u32,
    height: u32,
    spread: SpreadMode,
) -> Vec<u8> {
    span_to_rgba(gradient, width, height, spread, gradient.domain())
}

/// Renders positions `from..=to` across `width` columns, mapping each one
/// through `spread` before evaluation.
pub fn span_to_rgba(
    gradient: &Gradient,
    width: u32,
    height: u32,
    spread: SpreadMode,
    (from, to): (f64, f64),
) -> Vec<u8> {
    let row: Vec<u8> = linspace(from, to, width as usize)
        .into_iter()
        .flat_map(|t| gradient.spread_at(t, spread).to_rgba8())
        .collect();
    row.repeat(height as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorramp_core::{Color, GradientBuilder};

    fn black_to_white() -> Gradient {
        GradientBuilder::new().build().unwrap()
    }

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn gradient_to_rgba_correct_length() {
        let buf = gradient_to_rgba(&black_to_white(), 8, 4, SpreadMode::Clamp);
        assert_eq!(buf.len(), 8 * 4 * 4);
    }

    #[test]
    fn gradient_to_rgba_boundary_colors() {
        let buf = gradient_to_rgba(&black_to_white(), 5, 2, SpreadMode::Clamp);
        assert_eq!(pixel(&buf, 5, 0, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&buf, 5, 2, 0), [128, 128, 128, 255]);
        assert_eq!(pixel(&buf, 5, 4, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn rows_are_identical() {
        let buf = gradient_to_rgba(&black_to_white(), 7, 3, SpreadMode::Clamp);
        let row = 7 * 4;
        assert_eq!(buf[..row], buf[row..2 * row]);
        assert_eq!(buf[..row], buf[2 * row..]);
    }

    #[test]
    fn alpha_is_preserved() {
        let grad = GradientBuilder::new()
            .colors([Color::new(1.0, 0.0, 0.0, 0.0), Color::rgb(1.0, 0.0, 0.0)])
            .build()
            .unwrap();
        let buf = gradient_to_rgba(&grad, 3, 1, SpreadMode::Clamp);
        assert_eq!(pixel(&buf, 3, 0, 0)[3], 0);
        assert_eq!(pixel(&buf, 3, 1, 0)[3], 128);
        assert_eq!(pixel(&buf, 3, 2, 0)[3], 255);
    }

    #[test]
    fn repeat_span_tiles_the_strip() {
        let buf = span_to_rgba(&black_to_white(), 5, 1, SpreadMode::Repeat, (0.0, 2.0));
        assert_eq!(pixel(&buf, 5, 1, 0), [128, 128, 128, 255]);
        assert_eq!(pixel(&buf, 5, 2, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&buf, 5, 3, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn reflect_span_mirrors_the_strip() {
        let buf = span_to_rgba(&black_to_white(), 5, 1, SpreadMode::Reflect, (0.0, 2.0));
        assert_eq!(pixel(&buf, 5, 2, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&buf, 5, 4, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn empty_dimensions_give_empty_buffers() {
        assert!(gradient_to_rgba(&black_to_white(), 0, 4, SpreadMode::Clamp).is_empty());
        assert!(gradient_to_rgba(&black_to_white(), 4, 0, SpreadMode::Clamp).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn buffer_length_matches_dimensions(width in 0u32..64, height in 0u32..16) {
                let buf = gradient_to_rgba(&black_to_white(), width, height, SpreadMode::Repeat);
                prop_assert_eq!(buf.len(), (width * height * 4) as usize);
            }
        }
    }
}
