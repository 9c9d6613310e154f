//! Adaptive fourth-order Runge-Kutta-Nyström stepping in a magnetic field.
//!
//! The equation of motion is `d²r/ds² = λ · (dr/ds × B)` with
//! `λ = c · q/p`. Each step evaluates the field at the start, midpoint and
//! end of the step; the local error estimate `h² · |k1 - k2 - k3 + k4|₁`
//! drives the [`Accuracy`](crate::StepConstraint::Accuracy) bound.

use std::error::Error;
use std::fmt;

use helix_core::{StepError, Vector3};
use tracing::trace;

use crate::constrained::StepConstraint;
use crate::field::MagneticField;
use crate::state::StepperState;
use crate::stepper::{checked_step, Stepper};

const MIN_SCALE: f64 = 0.25;
const MAX_SCALE: f64 = 4.0;

// ── Config ───────────────────────────────────────────────────────

/// Error-control settings for [`RungeKuttaStepper`].
#[derive(Clone, Debug, PartialEq)]
pub struct RungeKuttaConfig {
    /// Largest accepted local error estimate per step.
    pub tolerance: f64,
    /// Step-size reductions attempted before a step is declared diverged.
    pub max_attempts: u32,
    /// Smallest step magnitude the stepper will shrink to.
    pub min_step_size: f64,
}

impl Default for RungeKuttaConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_attempts: 100,
            min_step_size: 1e-4,
        }
    }
}

impl RungeKuttaConfig {
    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), RungeKuttaConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(RungeKuttaConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if self.max_attempts == 0 {
            return Err(RungeKuttaConfigError::ZeroAttempts);
        }
        if !self.min_step_size.is_finite() || self.min_step_size <= 0.0 {
            return Err(RungeKuttaConfigError::InvalidMinStepSize {
                value: self.min_step_size,
            });
        }
        Ok(())
    }
}

/// A [`RungeKuttaConfig`] field is out of range.
#[derive(Clone, Debug, PartialEq)]
pub enum RungeKuttaConfigError {
    /// Tolerance must be positive and finite.
    InvalidTolerance {
        /// The rejected value.
        value: f64,
    },
    /// At least one attempt per step is required.
    ZeroAttempts,
    /// Minimum step size must be positive and finite.
    InvalidMinStepSize {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for RungeKuttaConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTolerance { value } => {
                write!(f, "tolerance must be positive and finite, got {value}")
            }
            Self::ZeroAttempts => write!(f, "max_attempts must be at least 1"),
            Self::InvalidMinStepSize { value } => {
                write!(f, "min_step_size must be positive and finite, got {value}")
            }
        }
    }
}

impl Error for RungeKuttaConfigError {}

// ── Stepper ──────────────────────────────────────────────────────

/// Field-following stepper with adaptive step size.
#[derive(Clone, Debug)]
pub struct RungeKuttaStepper<F> {
    field: F,
    config: RungeKuttaConfig,
}

impl<F: MagneticField> RungeKuttaStepper<F> {
    /// Stepper in `field` with validated `config`.
    pub fn new(field: F, config: RungeKuttaConfig) -> Result<Self, RungeKuttaConfigError> {
        config.validate()?;
        Ok(Self { field, config })
    }

    /// Stepper with the default error control.
    pub fn with_defaults(field: F) -> Self {
        Self {
            field,
            config: RungeKuttaConfig::default(),
        }
    }

    /// The field being integrated through.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Active error-control settings.
    pub fn config(&self) -> &RungeKuttaConfig {
        &self.config
    }

    fn step_scale(&self, error: f64) -> f64 {
        if error <= 0.0 {
            return MAX_SCALE;
        }
        (self.config.tolerance / (2.0 * error))
            .sqrt()
            .sqrt()
            .clamp(MIN_SCALE, MAX_SCALE)
    }
}

struct Stages {
    k1: Vector3,
    k2: Vector3,
    k3: Vector3,
    k4: Vector3,
    error: f64,
}

impl<F: MagneticField> RungeKuttaStepper<F> {
    fn stages(&self, position: &Vector3, direction: &Vector3, lambda: f64, h: f64, k1: Vector3) -> Stages {
        let half = 0.5 * h;
        let mid = position + half * direction + (h * h / 8.0) * k1;
        let b_mid = self.field.field(&mid);
        let k2 = lambda * (direction + half * k1).cross(&b_mid);
        let k3 = lambda * (direction + half * k2).cross(&b_mid);
        let end = position + h * direction + (h * h / 2.0) * k3;
        let b_end = self.field.field(&end);
        let k4 = lambda * (direction + h * k3).cross(&b_end);
        let error = h * h * (k1 - k2 - k3 + k4).abs().sum();
        Stages {
            k1,
            k2,
            k3,
            k4,
            error,
        }
    }
}

impl<F: MagneticField> Stepper for RungeKuttaStepper<F> {
    fn name(&self) -> &str {
        "runge-kutta"
    }

    fn step(&self, state: &mut StepperState) -> Result<f64, StepError> {
        let mut h = checked_step(state)?;
        let position = state.position;
        let direction = state.direction;
        let lambda = state.curvature();
        let k1 = lambda * direction.cross(&self.field.field(&position));

        let mut attempts = 0u32;
        let stages = loop {
            attempts += 1;
            let stages = self.stages(&position, &direction, lambda, h, k1);
            if stages.error <= self.config.tolerance {
                break stages;
            }
            h *= self.step_scale(stages.error);
            state.step_size.update(StepConstraint::Accuracy, h);
            trace!(attempts, error = stages.error, step = h, "shrinking step");
            if attempts >= self.config.max_attempts || h.abs() < self.config.min_step_size {
                return Err(StepError::IntegrationDiverged {
                    attempts,
                    step_size: h,
                });
            }
        };

        let Stages {
            k1,
            k2,
            k3,
            k4,
            error,
        } = stages;
        let new_position = position + h * direction + (h * h / 6.0) * (k1 + k2 + k3);
        let new_direction = direction + (h / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4);
        let norm = new_direction.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(StepError::DegenerateDirection);
        }

        state.advance(new_position, new_direction / norm, h);
        state
            .step_size
            .update(StepConstraint::Accuracy, h * self.step_scale(error));
        Ok(h)
    }
}
