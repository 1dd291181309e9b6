#![deny(unsafe_code)]
//! Core of the colorramp gradient engine.
//!
//! Provides the `Color` type and its blending spaces (linear RGB, OKLab,
//! CIE Lab/HCL/Luv, HSV), validated `StopList`s, linear and spline
//! interpolators, `SpreadMode` domain mapping, the immutable `Gradient` with
//! its `GradientBuilder`, sharp (banded) gradients, a CSS stop-list parser and
//! a serde `GradientConfig`.

pub mod blend;
pub mod color;
pub mod config;
pub mod css;
pub mod domain;
pub mod error;
pub mod gradient;
pub mod interpolate;
pub mod sharp;
pub mod stops;

pub use blend::BlendMode;
pub use color::Color;
pub use config::{GradientConfig, SharpConfig};
pub use domain::SpreadMode;
pub use error::GradientError;
pub use gradient::{Gradient, GradientBuilder};
pub use interpolate::{Interpolation, Interpolator};
pub use stops::{Stop, StopList};
