//! Error types for the colorramp core.
//!
//! Every variant is produced while a gradient is being built. Once built, a
//! [`Gradient`](crate::Gradient) never fails at evaluation time.

use thiserror::Error;

/// Errors produced while building a gradient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    /// Positions were not non-decreasing, or their count matched neither 0, 2,
    /// nor the number of colors.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// A two-point domain whose lower bound is not below its upper bound.
    #[error("degenerate domain: min ({min}) must be less than max ({max})")]
    DegenerateDomain { min: f64, max: f64 },

    /// One or more color tokens could not be parsed.
    #[error("invalid colors: {0:?}")]
    InvalidColor(Vec<String>),

    /// Fewer than two stops remained after zero-width filtering.
    #[error("insufficient stops: need at least 2, got {0}")]
    InsufficientStops(usize),

    /// A CSS gradient stop string was malformed.
    #[error("invalid gradient format: {0}")]
    InvalidFormat(String),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(String),
}
