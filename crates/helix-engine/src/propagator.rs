//! The propagation step loop.

use std::sync::Arc;
use std::time::Instant;

use helix_core::TrackParameters;
use helix_geometry::TrackingGeometry;
use helix_pipeline::{AbortList, ActionList, PropagationState};
use helix_stepper::{StepConstraint, Stepper, StepperState};
use helix_surface::{BoundaryCheck, Surface, SurfaceKind};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, PropagatorOptions};
use crate::metrics::PropagationMetrics;
use crate::navigator::{NavigationStatus, Navigator};
use crate::result::{PropagationError, PropagationOutcome, PropagationResult};

/// Drives a stepper through an optional geometry.
///
/// Immutable once built; one propagator can serve many runs, including
/// concurrent ones.
#[derive(Debug)]
pub struct Propagator<S> {
    stepper: S,
    geometry: Option<Arc<TrackingGeometry>>,
    options: PropagatorOptions,
}

impl<S: Stepper> Propagator<S> {
    /// Propagator without geometry, with validated `options`.
    pub fn new(stepper: S, options: PropagatorOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            stepper,
            geometry: None,
            options,
        })
    }

    /// Navigate through `geometry`.
    pub fn with_geometry(mut self, geometry: Arc<TrackingGeometry>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// The stepper.
    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// The geometry, if any.
    pub fn geometry(&self) -> Option<&Arc<TrackingGeometry>> {
        self.geometry.as_ref()
    }

    /// Run options.
    pub fn options(&self) -> &PropagatorOptions {
        &self.options
    }

    /// Propagate `start` until an abort, the world edge, or a limit.
    pub fn propagate<P: TrackParameters + ?Sized>(
        &self,
        start: &P,
        actions: &ActionList,
        aborts: &AbortList,
    ) -> Result<PropagationResult, PropagationError> {
        self.run(start, None, actions, aborts)
    }

    /// Propagate `start` onto `target`, additionally ending with
    /// [`TargetReached`](PropagationOutcome::TargetReached) and bound
    /// parameters once the surface is reached.
    pub fn propagate_to_surface<P: TrackParameters + ?Sized>(
        &self,
        start: &P,
        target: &dyn Surface,
        actions: &ActionList,
        aborts: &AbortList,
    ) -> Result<PropagationResult, PropagationError> {
        self.run(start, Some(target), actions, aborts)
    }

    fn run<P: TrackParameters + ?Sized>(
        &self,
        start: &P,
        target: Option<&dyn Surface>,
        actions: &ActionList,
        aborts: &AbortList,
    ) -> Result<PropagationResult, PropagationError> {
        let started = Instant::now();
        let opts = &self.options;
        let mut stepper = StepperState::new(start, opts.navigation_direction, opts.initial_step_size)?;
        let mut navigator = Navigator::new(self.geometry.as_deref());
        let start_volume = navigator.initialize(&stepper.position());
        let mut propagation = PropagationState::new(start_volume);
        let mut results = actions.new_results();
        let mut metrics = PropagationMetrics::default();

        debug!(
            stepper = self.stepper.name(),
            volume = ?start_volume,
            direction = %opts.navigation_direction,
            "propagation started"
        );

        let outcome = if navigator.is_active() && start_volume.is_none() {
            PropagationOutcome::LeftWorld
        } else {
            loop {
                if let Some(surface) = target {
                    if self.reach_target(surface, &mut stepper) {
                        propagation.target_reached = true;
                        break PropagationOutcome::TargetReached;
                    }
                }

                // Aborts assert their own user limits; the configured cap is
                // combined with whatever they leave behind.
                stepper.step_size_mut().release(StepConstraint::UserLimit);
                let t = Instant::now();
                let fired = aborts
                    .check(&results, &propagation, &mut stepper)
                    .map(str::to_string);
                metrics.abort_us += elapsed_us(t);
                if let Some(condition) = fired {
                    break PropagationOutcome::Aborted { condition };
                }

                if propagation.step_count >= opts.max_steps {
                    break PropagationOutcome::StepLimitReached;
                }
                let remaining = opts.path_limit - stepper.path_length().abs();
                if remaining <= opts.surface_tolerance {
                    break PropagationOutcome::PathLimitReached;
                }
                let cap = remaining.min(opts.max_step_size);
                let user = stepper
                    .step_size()
                    .bound(StepConstraint::UserLimit)
                    .map_or(cap, |bound| bound.min(cap));
                stepper
                    .step_size_mut()
                    .update(StepConstraint::UserLimit, user);

                let t = Instant::now();
                navigator.target_boundary(&mut stepper);
                metrics.navigation_us += elapsed_us(t);

                let h = match self.step_with_retries(&mut stepper, &mut metrics) {
                    Ok(h) => h,
                    Err(reason) => {
                        warn!(%reason, steps = propagation.step_count, "propagation failed");
                        break PropagationOutcome::Failed { reason };
                    }
                };
                propagation.step_count += 1;
                propagation.last_step = h;
                metrics.steps += 1;
                trace!(
                    step = propagation.step_count,
                    h,
                    path = stepper.path_length(),
                    "step"
                );

                let t = Instant::now();
                let status = navigator.update(&stepper);
                metrics.navigation_us += elapsed_us(t);
                propagation.current_volume = navigator.current_volume();
                if let NavigationStatus::Crossed { .. } = status {
                    metrics.boundary_crossings += 1;
                }

                let t = Instant::now();
                actions.run(&mut propagation, &mut stepper, &mut results);
                metrics.action_us += elapsed_us(t);

                if status == NavigationStatus::LeftWorld {
                    break PropagationOutcome::LeftWorld;
                }
            }
        };

        let bound_parameters = match (target, &outcome) {
            (Some(surface), PropagationOutcome::TargetReached) => {
                self.stepper.bound(&stepper, surface).ok()
            }
            _ => None,
        };

        metrics.total_us = elapsed_us(started);
        debug!(
            %outcome,
            steps = propagation.step_count,
            path = stepper.path_length(),
            "propagation finished"
        );

        Ok(PropagationResult {
            outcome,
            end_parameters: self.stepper.curvilinear(&stepper),
            bound_parameters,
            path_length: stepper.path_length(),
            steps: propagation.step_count,
            results,
            metrics,
            final_volume: navigator.current_volume(),
        })
    }

    /// Whether the state sits on `target`; otherwise assert the distance
    /// to it, or release the bound if it is not ahead.
    fn reach_target(&self, target: &dyn Surface, stepper: &mut StepperState) -> bool {
        let position = stepper.position();
        let heading = stepper.navigation_direction().sign() * stepper.direction();
        // A line contains every point of its bounds; only the point of
        // closest approach counts as reached.
        let arrived = match target.kind() {
            SurfaceKind::Straw | SurfaceKind::Perigee => {
                let closest =
                    target.intersection_estimate(&position, &heading, false, BoundaryCheck::Strict);
                closest.valid && closest.path_length.abs() <= self.options.surface_tolerance
            }
            SurfaceKind::Plane | SurfaceKind::Disc | SurfaceKind::Cylinder => {
                target.is_on_surface(&position, BoundaryCheck::Strict)
            }
        };
        if arrived {
            return true;
        }
        let hit = target.intersection_estimate(&position, &heading, true, BoundaryCheck::Strict);
        if hit.valid && hit.path_length > 0.0 {
            if hit.path_length <= self.options.surface_tolerance {
                return true;
            }
            stepper
                .step_size_mut()
                .update(StepConstraint::SurfaceDistance, hit.path_length);
        } else {
            stepper.step_size_mut().release(StepConstraint::SurfaceDistance);
        }
        false
    }

    fn step_with_retries(
        &self,
        stepper: &mut StepperState,
        metrics: &mut PropagationMetrics,
    ) -> Result<f64, helix_core::StepError> {
        let previous = stepper.step_size().bound(StepConstraint::Accuracy);
        let mut imposed = None;
        let mut retries = 0;
        loop {
            match self.stepper.step(stepper) {
                Ok(h) => {
                    // Undo the halving unless the stepper has since managed
                    // the accuracy bound itself.
                    if imposed.is_some() && stepper.step_size().bound(StepConstraint::Accuracy) == imposed {
                        match previous {
                            Some(bound) => stepper
                                .step_size_mut()
                                .update(StepConstraint::Accuracy, bound),
                            None => stepper.step_size_mut().release(StepConstraint::Accuracy),
                        }
                    }
                    return Ok(h);
                }
                Err(e) if retries < self.options.max_step_retries => {
                    retries += 1;
                    metrics.step_retries += 1;
                    let halved = 0.5 * stepper.step_size().magnitude();
                    stepper
                        .step_size_mut()
                        .update(StepConstraint::Accuracy, halved);
                    imposed = Some(halved);
                    warn!(error = %e, retries, step = halved, "retrying step");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn elapsed_us(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_micros()).unwrap_or(u64::MAX)
}
