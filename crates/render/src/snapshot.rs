//! PNG output of a rendered gradient strip.
//!
//! Feature-gated behind `png` (default on). The pixel buffer itself comes
//! from [`crate::pixel`].

use colorramp_core::{Gradient, GradientError, SpreadMode};
use std::path::Path;
use tracing::debug;

use crate::pixel::span_to_rgba;

/// Writes the gradient over its own domain as a `width` x `height` PNG.
///
/// Returns `GradientError::Io` on write failure.
pub fn write_png(
    gradient: &Gradient,
    width: u32,
    height: u32,
    spread: SpreadMode,
    path: &Path,
) -> Result<(), GradientError> {
    write_span_png(gradient, width, height, spread, gradient.domain(), path)
}

/// Writes positions `span.0..=span.1` mapped through `spread` as a PNG.
pub fn write_span_png(
    gradient: &Gradient,
    width: u32,
    height: u32,
    spread: SpreadMode,
    span: (f64, f64),
    path: &Path,
) -> Result<(), GradientError> {
    let rgba = span_to_rgba(gradient, width, height, spread, span);
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| GradientError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| GradientError::Io(e.to_string()))?;
    debug!(path = %path.display(), width, height, %spread, "wrote png");
    Ok(())
}
