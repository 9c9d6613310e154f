//! Batch propagation matches sequential propagation track for track.

use std::sync::Arc;

use helix_core::{CurvilinearParameters, TrackParameters};
use helix_engine::{propagate_batch, BatchConfig, PropagationError, Propagator, PropagatorOptions};
use helix_pipeline::{AbortList, ActionList, PathLimitReached, VolumeTransitionCollector};
use helix_stepper::{ConstantField, RungeKuttaStepper};
use helix_test_utils::{fixtures, track_from_origin};
use proptest::prelude::*;

fn propagator() -> Propagator<RungeKuttaStepper<ConstantField>> {
    let stepper = RungeKuttaStepper::with_defaults(ConstantField::along_z(2.0));
    Propagator::new(stepper, PropagatorOptions::default())
        .unwrap()
        .with_geometry(Arc::new(fixtures::barrel()))
}

fn fan(n: usize) -> Vec<CurvilinearParameters> {
    (0..n)
        .map(|i| {
            let phi = -3.0 + 6.0 * i as f64 / n as f64;
            let theta = 0.4 + 2.3 * ((i * 7) % n) as f64 / n as f64;
            let p = 0.2 + (i % 5) as f64 * 0.5;
            let charge = if i % 2 == 0 { 1.0 } else { -1.0 };
            track_from_origin(phi, theta, p, charge)
        })
        .collect()
}

#[test]
fn batch_equals_sequential_in_order() {
    let p = propagator();
    let actions = ActionList::builder().with(VolumeTransitionCollector).build().unwrap();
    let aborts = AbortList::builder().with(PathLimitReached::new(3000.0)).build().unwrap();
    let starts = fan(24);

    let sequential: Vec<_> = starts
        .iter()
        .map(|s| p.propagate(s, &actions, &aborts).unwrap())
        .collect();
    let batch = propagate_batch(&p, &starts, &actions, &aborts, &BatchConfig { workers: Some(4) });

    assert_eq!(batch.len(), sequential.len());
    for (i, (b, s)) in batch.into_iter().zip(&sequential).enumerate() {
        let b = b.unwrap();
        assert_eq!(b.outcome, s.outcome, "track {i}");
        assert_eq!(b.steps, s.steps, "track {i}");
        assert_eq!(b.path_length, s.path_length, "track {i}");
        assert_eq!(b.end_parameters, s.end_parameters, "track {i}");
        assert_eq!(b.final_volume, s.final_volume, "track {i}");
        assert_eq!(
            b.get::<VolumeTransitionCollector>(),
            s.get::<VolumeTransitionCollector>(),
            "track {i}"
        );
    }
}

#[test]
fn invalid_start_fails_only_its_own_track() {
    let p = propagator();
    let mut starts = fan(6);
    starts[3] = CurvilinearParameters::new(starts[3].position(), starts[3].momentum(), f64::NAN);

    let results = propagate_batch(
        &p,
        &starts,
        &ActionList::empty(),
        &AbortList::empty(),
        &BatchConfig::default(),
    );

    assert_eq!(results.len(), 6);
    for (i, r) in results.iter().enumerate() {
        if i == 3 {
            assert!(matches!(r, Err(PropagationError::InvalidStart(_))));
        } else {
            assert!(r.is_ok(), "track {i}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn worker_count_does_not_change_results(workers in 1usize..6, n in 1usize..10) {
        let p = propagator();
        let starts = fan(n);
        let actions = ActionList::empty();
        let aborts = AbortList::empty();
        let one = propagate_batch(&p, &starts, &actions, &aborts, &BatchConfig { workers: Some(1) });
        let many = propagate_batch(&p, &starts, &actions, &aborts, &BatchConfig { workers: Some(workers) });
        prop_assert_eq!(one.len(), many.len());
        for (a, b) in one.iter().zip(&many) {
            let (a, b) = (a.as_ref().unwrap(), b.as_ref().unwrap());
            prop_assert_eq!(&a.outcome, &b.outcome);
            prop_assert_eq!(a.end_parameters, b.end_parameters);
        }
    }
}
