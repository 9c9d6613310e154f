//! Error types shared across the propagation layers.
//!
//! Numerical step failures ([`StepError`]) are kept apart from
//! caller-ordering mistakes ([`ConversionError`]) and from invalid start
//! conditions ([`StateError`]); the engine treats each class differently.

use std::error::Error;
use std::fmt;

use crate::id::SurfaceId;

/// A single stepper advance failed.
///
/// Reported to the propagator, which may retry with a smaller step or end
/// the run. Never fatal on its own.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// Adaptive integration did not reach the error tolerance.
    IntegrationDiverged {
        /// Trial steps evaluated before giving up.
        attempts: u32,
        /// Last step size tried.
        step_size: f64,
    },
    /// The direction vector lost its norm (zero or non-finite).
    DegenerateDirection,
    /// The effective step is zero or not finite.
    InvalidStepSize {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegrationDiverged {
                attempts,
                step_size,
            } => write!(
                f,
                "integration did not converge after {attempts} attempts (last step {step_size})"
            ),
            Self::DegenerateDirection => write!(f, "direction vector is degenerate"),
            Self::InvalidStepSize { value } => {
                write!(f, "step size must be finite and nonzero, got {value}")
            }
        }
    }
}

impl Error for StepError {}

/// Requested surface-bound parameters while the state is not on the surface.
///
/// Signals a caller-ordering bug: conversions should only be requested
/// once the navigator has confirmed the surface was reached.
#[derive(Clone, Debug, PartialEq)]
pub enum ConversionError {
    /// The current position is not on the surface within tolerance.
    OffSurface {
        /// The target surface.
        surface: SurfaceId,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffSurface { surface } => {
                write!(f, "position is not on surface {surface}")
            }
        }
    }
}

impl Error for ConversionError {}

/// Start parameters cannot seed a stepper state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateError {
    /// Position, momentum or step guess is unusable.
    InvalidParameters {
        /// What is wrong with the input.
        reason: String,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { reason } => write!(f, "invalid track parameters: {reason}"),
        }
    }
}

impl Error for StateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_informative() {
        let e = StepError::IntegrationDiverged {
            attempts: 7,
            step_size: 0.25,
        };
        let msg = e.to_string();
        assert!(msg.contains("did not converge"));
        assert!(msg.contains('7'));

        let s = SurfaceId::next();
        let c = ConversionError::OffSurface { surface: s };
        assert!(c.to_string().contains(&s.to_string()));

        let p = StateError::InvalidParameters {
            reason: "zero momentum".into(),
        };
        assert!(p.to_string().contains("zero momentum"));
    }
}
