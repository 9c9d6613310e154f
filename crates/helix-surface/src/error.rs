//! Error types for surface construction.

use std::fmt;

/// Errors arising from surface construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// A bounds parameter is negative, zero where it must not be, or not finite.
    InvalidBounds {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { reason } => write!(f, "invalid bounds: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}
