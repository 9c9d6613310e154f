//! Reusable geometry, stepper, action and abort fixtures.
//!
//! - [`world_with_child`]: box world of half-length 50 with one child box
//!   spanning x in [0, 10].
//! - [`nested_boxes`]: three concentric boxes.
//! - [`barrel`]: nested cylinders with layers, for field-following runs.
//! - [`FailingStepper`]: straight-line stepper with a run of failed steps.
//! - [`StepLengthRecorder`]: action recording every step length.
//! - [`PanickingAbort`]: abort condition that must never be evaluated.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use helix_core::math::translation;
use helix_core::{StepError, Vector3, VolumeId};
use helix_geometry::{GeometryBuilder, TrackingGeometry, VolumeBounds};
use helix_pipeline::{AbortCondition, Action, PropagationState, ResultAggregate, ResultView};
use helix_stepper::{Stepper, StepperState, StraightLineStepper};
use helix_surface::CylinderSurface;

// ── Geometries ─────────────────────────────────────────────────────

/// Box world of half-length 50 with a child box `C` spanning x in
/// [0, 10] and |y|, |z| <= 5. Returns the geometry and the child's id.
pub fn world_with_child() -> (TrackingGeometry, VolumeId) {
    let mut builder = GeometryBuilder::new(
        "world",
        translation(Vector3::zeros()),
        VolumeBounds::cuboid(50.0, 50.0, 50.0).expect("valid world bounds"),
    );
    let child = builder
        .add_volume(
            VolumeId::WORLD,
            "C",
            translation(Vector3::new(5.0, 0.0, 0.0)),
            VolumeBounds::cuboid(5.0, 5.0, 5.0).expect("valid child bounds"),
        )
        .expect("child fits in world");
    (builder.build().expect("geometry builds"), child)
}

/// Concentric boxes `world` (100), `outer` (50) and `inner` (20),
/// half-lengths in brackets.
pub fn nested_boxes() -> TrackingGeometry {
    let mut builder = GeometryBuilder::new(
        "world",
        translation(Vector3::zeros()),
        VolumeBounds::cuboid(100.0, 100.0, 100.0).expect("valid bounds"),
    );
    let outer = builder
        .add_volume(
            VolumeId::WORLD,
            "outer",
            translation(Vector3::zeros()),
            VolumeBounds::cuboid(50.0, 50.0, 50.0).expect("valid bounds"),
        )
        .expect("outer fits");
    builder
        .add_volume(
            outer,
            "inner",
            translation(Vector3::zeros()),
            VolumeBounds::cuboid(20.0, 20.0, 20.0).expect("valid bounds"),
        )
        .expect("inner fits");
    builder.build().expect("geometry builds")
}

/// Nested cylinders around the z axis: `world` (r 1000, |z| 1500),
/// `tracker` (r 500, |z| 1000) and `pixel` (r 100, |z| 400), with
/// cylindrical layers at r = 33, 70 (pixel) and 200, 350 (tracker).
pub fn barrel() -> TrackingGeometry {
    let cylinder = |r_max, half_z| VolumeBounds::cylinder(0.0, r_max, half_z).expect("valid bounds");
    let mut builder = GeometryBuilder::new("world", translation(Vector3::zeros()), cylinder(1000.0, 1500.0));
    let tracker = builder
        .add_volume(VolumeId::WORLD, "tracker", translation(Vector3::zeros()), cylinder(500.0, 1000.0))
        .expect("tracker fits");
    let pixel = builder
        .add_volume(tracker, "pixel", translation(Vector3::zeros()), cylinder(100.0, 400.0))
        .expect("pixel fits");
    for (volume, radius, half_z) in [
        (pixel, 33.0, 400.0),
        (pixel, 70.0, 400.0),
        (tracker, 200.0, 1000.0),
        (tracker, 350.0, 1000.0),
    ] {
        let surface = CylinderSurface::new(translation(Vector3::zeros()), radius, half_z)
            .expect("valid layer");
        let envelope = VolumeBounds::cylinder(radius - 1.0, radius + 1.0, half_z).expect("valid envelope");
        builder
            .add_layer(volume, Arc::new(surface), envelope)
            .expect("layer volume exists");
    }
    builder.build().expect("geometry builds")
}

// ── Stepper ────────────────────────────────────────────────────────

/// Steps in straight lines for the first `succeed_for` calls, then fails
/// `failures` consecutive calls with [`StepError::IntegrationDiverged`]
/// before stepping in straight lines again.
pub struct FailingStepper {
    succeed_for: usize,
    failures: usize,
    calls: AtomicUsize,
}

impl FailingStepper {
    /// Fails every call after the first `succeed_for`.
    pub fn new(succeed_for: usize) -> Self {
        Self::with_failures(succeed_for, usize::MAX)
    }

    pub fn with_failures(succeed_for: usize, failures: usize) -> Self {
        Self {
            succeed_for,
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    /// Calls made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Stepper for FailingStepper {
    fn name(&self) -> &str {
        "failing"
    }

    fn step(&self, state: &mut StepperState) -> Result<f64, StepError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n < self.succeed_for || n - self.succeed_for >= self.failures {
            StraightLineStepper.step(state)
        } else {
            Err(StepError::IntegrationDiverged {
                attempts: 1,
                step_size: state.step_size().value(),
            })
        }
    }
}

// ── Actions and aborts ─────────────────────────────────────────────

/// Records the signed length of every step.
pub struct StepLengthRecorder;

impl Action for StepLengthRecorder {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        "step lengths"
    }

    fn act(
        &self,
        propagation: &mut PropagationState,
        _stepper: &mut StepperState,
        output: &mut Vec<f64>,
        _earlier: &ResultView<'_>,
    ) {
        output.push(propagation.last_step);
    }
}

/// Panics when evaluated; place it after a condition that fires to check
/// short-circuiting.
pub struct PanickingAbort;

impl AbortCondition for PanickingAbort {
    fn name(&self) -> &str {
        "panicking"
    }

    fn check(&self, _: &ResultAggregate, _: &PropagationState, _: &mut StepperState) -> bool {
        panic!("PanickingAbort evaluated")
    }
}
