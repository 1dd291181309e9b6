#![deny(unsafe_code)]
//! Rasterization of gradients into RGBA8 strips.
//!
//! [`pixel`] is pure computation and always available. [`snapshot`] writes PNG
//! files and sits behind the `png` feature (default on) so that consumers that
//! only need the pixel buffer do not pull in the `image` crate.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::{gradient_to_rgba, span_to_rgba};
