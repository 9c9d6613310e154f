//! Propagator and batch configuration.

use std::error::Error;
use std::fmt;

use helix_core::NavigationDirection;
use helix_pipeline::PipelineError;
use helix_stepper::RungeKuttaConfigError;

// ── PropagatorOptions ──────────────────────────────────────────────

/// Limits and defaults for a propagation run.
#[derive(Clone, Debug, PartialEq)]
pub struct PropagatorOptions {
    /// Maximum number of steps before the run ends with
    /// [`StepLimitReached`](crate::PropagationOutcome::StepLimitReached).
    pub max_steps: u64,
    /// Largest single step (mm).
    pub max_step_size: f64,
    /// Maximum absolute path length (mm); infinite for no limit.
    pub path_limit: f64,
    /// How often a failed step is retried with a halved accuracy bound.
    pub max_step_retries: u32,
    /// First guess for the accuracy bound (mm).
    pub initial_step_size: f64,
    /// Direction relative to the momentum.
    pub navigation_direction: NavigationDirection,
    /// Distance below which a surface counts as reached (mm).
    pub surface_tolerance: f64,
}

impl Default for PropagatorOptions {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_step_size: 1000.0,
            path_limit: f64::INFINITY,
            max_step_retries: 3,
            initial_step_size: 10.0,
            navigation_direction: NavigationDirection::Forward,
            surface_tolerance: helix_core::units::ON_SURFACE_TOLERANCE,
        }
    }
}

impl PropagatorOptions {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        if !self.max_step_size.is_finite() || self.max_step_size <= 0.0 {
            return Err(ConfigError::InvalidStepSize {
                field: "max_step_size",
                value: self.max_step_size,
            });
        }
        if !self.initial_step_size.is_finite() || self.initial_step_size <= 0.0 {
            return Err(ConfigError::InvalidStepSize {
                field: "initial_step_size",
                value: self.initial_step_size,
            });
        }
        if self.path_limit.is_nan() || self.path_limit <= 0.0 {
            return Err(ConfigError::InvalidPathLimit {
                value: self.path_limit,
            });
        }
        if !self.surface_tolerance.is_finite() || self.surface_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.surface_tolerance,
            });
        }
        Ok(())
    }
}

// ── BatchConfig ────────────────────────────────────────────────────

/// Worker pool settings for [`propagate_batch`](crate::propagate_batch).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Worker threads; `None` uses the available parallelism.
    pub workers: Option<usize>,
}

impl BatchConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// Configuration errors, detected before any track is propagated.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Action or abort list construction failed.
    Pipeline(PipelineError),
    /// Runge-Kutta error-control settings are invalid.
    RungeKutta(RungeKuttaConfigError),
    /// `max_steps` is zero.
    ZeroMaxSteps,
    /// A step size is NaN, infinite, zero, or negative.
    InvalidStepSize {
        /// Which option.
        field: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// `path_limit` is NaN, zero, or negative.
    InvalidPathLimit {
        /// The invalid value.
        value: f64,
    },
    /// `surface_tolerance` is NaN, infinite, zero, or negative.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
    /// Batch worker count is zero.
    ZeroWorkers,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
            Self::RungeKutta(e) => write!(f, "runge-kutta: {e}"),
            Self::ZeroMaxSteps => write!(f, "max_steps must be at least 1"),
            Self::InvalidStepSize { field, value } => {
                write!(f, "{field} must be finite and positive, got {value}")
            }
            Self::InvalidPathLimit { value } => {
                write!(f, "path_limit must be positive, got {value}")
            }
            Self::InvalidTolerance { value } => {
                write!(f, "surface_tolerance must be finite and positive, got {value}")
            }
            Self::ZeroWorkers => write!(f, "batch worker count must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pipeline(e) => Some(e),
            Self::RungeKutta(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PipelineError> for ConfigError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<RungeKuttaConfigError> for ConfigError {
    fn from(e: RungeKuttaConfigError) -> Self {
        Self::RungeKutta(e)
    }
}
