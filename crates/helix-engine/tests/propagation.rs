//! End-to-end propagation through the reference geometries.

use std::sync::Arc;

use helix_core::math::perp;
use helix_core::units::helix_radius;
use helix_core::{NavigationDirection, TrackParameters, Vector3, VolumeId};
use helix_engine::{PropagationOutcome, Propagator, PropagatorOptions};
use helix_geometry::TrackingGeometry;
use helix_pipeline::{AbortList, ActionList, StepCollector, StepCountReached, VolumeTransitionCollector};
use helix_stepper::{ConstantField, RungeKuttaStepper, StraightLineStepper};
use helix_test_utils::fixtures::{self, PanickingAbort, StepLengthRecorder};
use helix_test_utils::{track_at, track_from_origin};

fn id(geometry: &TrackingGeometry, name: &str) -> Option<VolumeId> {
    geometry.tracking_volume(name).map(|v| v.id())
}

fn straight_line(geometry: TrackingGeometry) -> Propagator<StraightLineStepper> {
    let opts = PropagatorOptions {
        initial_step_size: 1000.0,
        ..Default::default()
    };
    Propagator::new(StraightLineStepper, opts)
        .unwrap()
        .with_geometry(Arc::new(geometry))
}

#[test]
fn nested_boxes_are_left_one_by_one() {
    let geometry = fixtures::nested_boxes();
    let (world, outer, inner) = (
        id(&geometry, "world"),
        id(&geometry, "outer"),
        id(&geometry, "inner"),
    );
    let p = straight_line(geometry);
    let actions = ActionList::builder()
        .with(VolumeTransitionCollector)
        .with(StepLengthRecorder)
        .build()
        .unwrap();

    let result = p
        .propagate(&track_at(Vector3::zeros(), Vector3::x(), 1.0), &actions, &AbortList::empty())
        .unwrap();

    assert_eq!(result.outcome, PropagationOutcome::LeftWorld);
    assert_eq!(result.final_volume, None);
    assert_eq!(result.steps, 3);
    assert_eq!(result.metrics.boundary_crossings, 2);
    assert!((result.path_length - 100.0).abs() < 1e-9);

    let transitions = result.get::<VolumeTransitionCollector>().unwrap();
    let pairs: Vec<_> = transitions.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(pairs, vec![(inner, outer), (outer, world), (world, None)]);
    let at: Vec<_> = transitions.iter().map(|t| t.position.x).collect();
    for (x, expected) in at.iter().zip([20.0, 50.0, 100.0]) {
        assert!((x - expected).abs() < 1e-9, "crossing at {x}, expected {expected}");
    }

    let lengths = result.get::<StepLengthRecorder>().unwrap();
    let expected = [20.0, 30.0, 50.0];
    for (h, e) in lengths.iter().zip(expected) {
        assert!((h - e).abs() < 1e-9);
    }
}

#[test]
fn backward_run_enters_from_the_other_side() {
    let geometry = fixtures::nested_boxes();
    let (outer, inner) = (id(&geometry, "outer"), id(&geometry, "inner"));
    let opts = PropagatorOptions {
        initial_step_size: 1000.0,
        navigation_direction: NavigationDirection::Backward,
        ..Default::default()
    };
    let p = Propagator::new(StraightLineStepper, opts)
        .unwrap()
        .with_geometry(Arc::new(geometry));
    let actions = ActionList::builder().with(VolumeTransitionCollector).build().unwrap();

    let result = p
        .propagate(
            &track_at(Vector3::new(30.0, 0.0, 0.0), Vector3::x(), -1.0),
            &actions,
            &AbortList::empty(),
        )
        .unwrap();

    assert_eq!(result.outcome, PropagationOutcome::LeftWorld);
    assert!((result.path_length + 130.0).abs() < 1e-9);
    let transitions = result.get::<VolumeTransitionCollector>().unwrap();
    assert_eq!((transitions[0].from, transitions[0].to), (outer, inner));
    assert!((transitions[0].position.x - 20.0).abs() < 1e-9);
    assert!((result.end_parameters.position().x + 100.0).abs() < 1e-9);
}

#[test]
fn abort_list_short_circuits_before_later_conditions() {
    let p = straight_line(fixtures::nested_boxes());
    let aborts = AbortList::builder()
        .with(StepCountReached { max_steps: 0 })
        .with(PanickingAbort)
        .build()
        .unwrap();
    let start = track_at(Vector3::zeros(), Vector3::x(), 1.0);

    let result = p.propagate(&start, &ActionList::empty(), &aborts).unwrap();
    assert_eq!(
        result.outcome,
        PropagationOutcome::Aborted {
            condition: "step count".to_string()
        }
    );
    assert_eq!(result.steps, 0);
    assert_eq!(result.final_volume, id(p.geometry().unwrap(), "inner"));
}

#[test]
fn curved_track_leaves_the_barrel() {
    let geometry = fixtures::barrel();
    let (world, tracker, pixel) = (
        id(&geometry, "world"),
        id(&geometry, "tracker"),
        id(&geometry, "pixel"),
    );
    let stepper = RungeKuttaStepper::with_defaults(ConstantField::along_z(2.0));
    let p = Propagator::new(stepper, PropagatorOptions::default())
        .unwrap()
        .with_geometry(Arc::new(geometry));
    let actions = ActionList::builder()
        .with(VolumeTransitionCollector)
        .with(StepCollector)
        .build()
        .unwrap();
    let start = track_from_origin(0.0, std::f64::consts::FRAC_PI_2, 1.0, 1.0);

    let result = p.propagate(&start, &actions, &AbortList::empty()).unwrap();

    assert_eq!(result.outcome, PropagationOutcome::LeftWorld);
    let transitions = result.get::<VolumeTransitionCollector>().unwrap();
    let pairs: Vec<_> = transitions.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(
        pairs,
        vec![(pixel, tracker), (tracker, world), (world, None)]
    );
    assert!((perp(&transitions[0].position) - 100.0).abs() < 0.01);
    assert!((perp(&transitions[1].position) - 500.0).abs() < 0.01);

    // Arc length from the origin to radius r on a circle of radius R
    // through the origin is 2R asin(r / 2R).
    let radius = helix_radius(1.0, 2.0, 1.0);
    let arc = 2.0 * radius * (1000.0 / (2.0 * radius)).asin();
    let end = result.end_parameters.position();
    assert!((perp(&end) - 1000.0).abs() < 0.01, "left at r = {}", perp(&end));
    assert!((result.path_length - arc).abs() < 0.1);
    assert!(end.z.abs() < 1e-9);
    assert!((result.end_parameters.absolute_momentum() - 1.0).abs() < 1e-9);

    let steps = result.get::<StepCollector>().unwrap();
    assert_eq!(steps.len() as u64, result.steps);
    assert!(steps.iter().all(|s| s.position.y <= 1e-9));
}

#[test]
fn looper_is_stopped_by_the_path_limit() {
    // 0.1 GeV/c in 2 T curls with a radius of about 167 mm, inside the
    // tracker; it never reaches the world edge.
    let stepper = RungeKuttaStepper::with_defaults(ConstantField::along_z(2.0));
    let opts = PropagatorOptions {
        path_limit: 5000.0,
        max_steps: 10_000,
        ..Default::default()
    };
    let p = Propagator::new(stepper, opts)
        .unwrap()
        .with_geometry(Arc::new(fixtures::barrel()));
    let start = track_from_origin(0.5, std::f64::consts::FRAC_PI_2, 0.1, -1.0);

    let result = p.propagate(&start, &ActionList::empty(), &AbortList::empty()).unwrap();

    assert_eq!(result.outcome, PropagationOutcome::PathLimitReached);
    assert!((result.path_length - 5000.0).abs() < 1e-3);
    let r = perp(&result.end_parameters.position());
    assert!(r <= 2.0 * helix_radius(0.1, 2.0, 1.0) + 1e-3);
}
