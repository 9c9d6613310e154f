//! Navigation-level state shared by actions and abort conditions.

use helix_core::VolumeId;

/// Per-run bookkeeping maintained by the propagator alongside the
/// [`StepperState`](helix_stepper::StepperState).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropagationState {
    /// Volume the run started in, if any.
    pub start_volume: Option<VolumeId>,
    /// Volume containing the current position; `None` once the world has
    /// been left or without geometry.
    pub current_volume: Option<VolumeId>,
    /// Steps completed so far.
    pub step_count: u64,
    /// Signed length of the last step.
    pub last_step: f64,
    /// Set once a requested target surface has been reached.
    pub target_reached: bool,
}

impl PropagationState {
    /// State for a run starting in `volume`.
    pub fn new(volume: Option<VolumeId>) -> Self {
        Self {
            start_volume: volume,
            current_volume: volume,
            ..Self::default()
        }
    }
}
