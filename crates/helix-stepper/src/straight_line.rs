//! Field-free stepping.

use helix_core::StepError;

use crate::state::StepperState;
use crate::stepper::{checked_step, Stepper};

/// Moves along the current direction by the full constrained step.
///
/// Exact for neutral particles and for charged ones without a field.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightLineStepper;

impl StraightLineStepper {
    /// Create a stepper.
    pub fn new() -> Self {
        Self
    }
}

impl Stepper for StraightLineStepper {
    fn name(&self) -> &str {
        "straight-line"
    }

    fn step(&self, state: &mut StepperState) -> Result<f64, StepError> {
        let h = checked_step(state)?;
        let direction = state.direction;
        let position = state.position + h * direction;
        state.advance(position, direction, h);
        Ok(h)
    }
}
