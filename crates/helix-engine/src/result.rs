//! Run outcomes, results and start-up errors.

use std::error::Error;
use std::fmt;

use helix_core::{BoundParameters, CurvilinearParameters, StateError, StepError, VolumeId};
use helix_pipeline::{Action, ResultAggregate};

use crate::config::ConfigError;
use crate::metrics::PropagationMetrics;

/// Why a run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagationOutcome {
    /// An abort condition fired.
    Aborted {
        /// Name of the condition.
        condition: String,
    },
    /// The requested target surface was reached.
    TargetReached,
    /// The track left the world volume.
    LeftWorld,
    /// The configured path limit was reached.
    PathLimitReached,
    /// The configured step budget was exhausted.
    StepLimitReached,
    /// A step failed and retries were exhausted.
    Failed {
        /// The last step error.
        reason: StepError,
    },
}

impl PropagationOutcome {
    /// Whether the run ended without a numerical failure.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for PropagationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted { condition } => write!(f, "aborted by '{condition}'"),
            Self::TargetReached => write!(f, "target reached"),
            Self::LeftWorld => write!(f, "left the world"),
            Self::PathLimitReached => write!(f, "path limit reached"),
            Self::StepLimitReached => write!(f, "step limit reached"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct PropagationResult {
    /// Why the run ended.
    pub outcome: PropagationOutcome,
    /// Free parameters at the final position.
    pub end_parameters: CurvilinearParameters,
    /// Parameters on the target surface, for targeted runs that reached it.
    pub bound_parameters: Option<BoundParameters>,
    /// Signed path length travelled.
    pub path_length: f64,
    /// Successful steps taken.
    pub steps: u64,
    /// Outputs of the action list.
    pub results: ResultAggregate,
    /// Timing and counters.
    pub metrics: PropagationMetrics,
    /// Volume containing the final position.
    pub final_volume: Option<VolumeId>,
}

impl PropagationResult {
    /// Output of action `A`.
    pub fn get<A: Action>(&self) -> Option<&A::Output> {
        self.results.get::<A>()
    }
}

/// Errors that prevent a run from starting.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagationError {
    /// The start parameters cannot seed a stepper state.
    InvalidStart(StateError),
    /// The propagator or batch configuration is invalid.
    InvalidOptions(ConfigError),
}

impl fmt::Display for PropagationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart(e) => write!(f, "invalid start: {e}"),
            Self::InvalidOptions(e) => write!(f, "invalid options: {e}"),
        }
    }
}

impl Error for PropagationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidStart(e) => Some(e),
            Self::InvalidOptions(e) => Some(e),
        }
    }
}

impl From<StateError> for PropagationError {
    fn from(e: StateError) -> Self {
        Self::InvalidStart(e)
    }
}

impl From<ConfigError> for PropagationError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidOptions(e)
    }
}
