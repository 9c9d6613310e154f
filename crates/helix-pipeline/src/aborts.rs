//! Built-in abort conditions.

use helix_stepper::{StepConstraint, StepperState};

use crate::abort::AbortCondition;
use crate::results::ResultAggregate;
use crate::state::PropagationState;

/// Fires once the absolute path length reaches `limit`.
///
/// While the limit is still ahead it asserts the remaining distance as the
/// [`UserLimit`](StepConstraint::UserLimit) bound, so the run ends on the
/// limit rather than past it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathLimitReached {
    /// Maximum absolute path length.
    pub limit: f64,
    /// Remaining distance below which the limit counts as reached.
    pub tolerance: f64,
}

impl PathLimitReached {
    /// Limit with the default tolerance of one micrometre.
    pub fn new(limit: f64) -> Self {
        Self {
            limit,
            tolerance: 1e-3,
        }
    }
}

impl AbortCondition for PathLimitReached {
    fn name(&self) -> &str {
        "path limit"
    }

    fn check(&self, _: &ResultAggregate, _: &PropagationState, stepper: &mut StepperState) -> bool {
        let remaining = self.limit.abs() - stepper.path_length().abs();
        if remaining <= self.tolerance {
            return true;
        }
        stepper
            .step_size_mut()
            .update(StepConstraint::UserLimit, remaining);
        false
    }
}

/// Fires after `max_steps` completed steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepCountReached {
    /// Step budget.
    pub max_steps: u64,
}

impl AbortCondition for StepCountReached {
    fn name(&self) -> &str {
        "step count"
    }

    fn check(&self, _: &ResultAggregate, propagation: &PropagationState, _: &mut StepperState) -> bool {
        propagation.step_count >= self.max_steps
    }
}

/// Fires when the absolute momentum drops below `threshold` (GeV/c).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumBelow {
    /// Momentum threshold.
    pub threshold: f64,
}

impl AbortCondition for MomentumBelow {
    fn name(&self) -> &str {
        "momentum below threshold"
    }

    fn check(&self, _: &ResultAggregate, _: &PropagationState, stepper: &mut StepperState) -> bool {
        stepper.absolute_momentum() < self.threshold
    }
}
