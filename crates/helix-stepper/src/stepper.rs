//! The stepper trait.

use helix_core::{BoundParameters, ConversionError, CurvilinearParameters, StepError};
use helix_surface::Surface;

use crate::convert;
use crate::state::StepperState;

/// Advances a [`StepperState`] by one constrained step.
///
/// Steppers are immutable and shared across runs; all per-run data lives
/// in the state.
///
/// # Contract
///
/// - `step` never moves further than `|state.step_size().value()|`
/// - on success it returns the signed path length actually travelled
/// - on failure the position and direction are left untouched
pub trait Stepper: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Take one step, returning the signed path length travelled.
    fn step(&self, state: &mut StepperState) -> Result<f64, StepError>;

    /// Free parameters at the current position.
    fn curvilinear(&self, state: &StepperState) -> CurvilinearParameters {
        convert::curvilinear(state)
    }

    /// Parameters on `surface`; fails if the state is not on it.
    fn bound(
        &self,
        state: &StepperState,
        surface: &dyn Surface,
    ) -> Result<BoundParameters, ConversionError> {
        convert::bound(state, surface)
    }
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn step(&self, state: &mut StepperState) -> Result<f64, StepError> {
        (**self).step(state)
    }

    fn curvilinear(&self, state: &StepperState) -> CurvilinearParameters {
        (**self).curvilinear(state)
    }

    fn bound(
        &self,
        state: &StepperState,
        surface: &dyn Surface,
    ) -> Result<BoundParameters, ConversionError> {
        (**self).bound(state, surface)
    }
}

/// The step a stepper should attempt, or an error if no finite bound has
/// been asserted.
pub(crate) fn checked_step(state: &StepperState) -> Result<f64, StepError> {
    let h = state.step_size.value();
    if !h.is_finite() || h == 0.0 || h.abs() >= crate::ConstrainedStep::UNCONSTRAINED {
        return Err(StepError::InvalidStepSize { value: h });
    }
    let n = state.direction.norm();
    if !n.is_finite() || n == 0.0 {
        return Err(StepError::DegenerateDirection);
    }
    Ok(h)
}
