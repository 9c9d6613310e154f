//! Built-in actions.

use helix_core::{Vector3, VolumeId};
use helix_stepper::StepperState;

use crate::action::Action;
use crate::results::ResultView;
use crate::state::PropagationState;

/// One point of a recorded trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRecord {
    /// Global position after the step.
    pub position: Vector3,
    /// Global momentum after the step.
    pub momentum: Vector3,
    /// Accumulated signed path length.
    pub path_length: f64,
    /// Volume containing the position, if known.
    pub volume: Option<VolumeId>,
}

/// Records the state after every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepCollector;

impl Action for StepCollector {
    type Output = Vec<StepRecord>;

    fn name(&self) -> &str {
        "step collector"
    }

    fn act(
        &self,
        propagation: &mut PropagationState,
        stepper: &mut StepperState,
        output: &mut Vec<StepRecord>,
        _: &ResultView<'_>,
    ) {
        output.push(StepRecord {
            position: stepper.position(),
            momentum: stepper.momentum(),
            path_length: stepper.path_length(),
            volume: propagation.current_volume,
        });
    }
}

/// A change of the current volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeTransition {
    /// Volume left; `None` if the run started outside any volume.
    pub from: Option<VolumeId>,
    /// Volume entered; `None` when leaving the world.
    pub to: Option<VolumeId>,
    /// Position at which the change was observed.
    pub position: Vector3,
    /// Path length at which the change was observed.
    pub path_length: f64,
}

/// Records every change of [`PropagationState::current_volume`].
#[derive(Clone, Copy, Debug, Default)]
pub struct VolumeTransitionCollector;

impl Action for VolumeTransitionCollector {
    type Output = Vec<VolumeTransition>;

    fn name(&self) -> &str {
        "volume transitions"
    }

    fn act(
        &self,
        propagation: &mut PropagationState,
        stepper: &mut StepperState,
        output: &mut Vec<VolumeTransition>,
        _: &ResultView<'_>,
    ) {
        let last = output
            .last()
            .map_or(propagation.start_volume, |t| t.to);
        if last != propagation.current_volume {
            output.push(VolumeTransition {
                from: last,
                to: propagation.current_volume,
                position: stepper.position(),
                path_length: stepper.path_length(),
            });
        }
    }
}
