//! Parallel propagation of independent tracks.
//!
//! Track indices are fed to a scoped worker pool through a crossbeam
//! channel; each worker owns its run state and sends `(index, result)`
//! back. Results are reassembled in input order, so the output is
//! identical to propagating the tracks one after another.

use std::thread;

use crossbeam_channel::unbounded;
use helix_core::TrackParameters;
use helix_pipeline::{AbortList, ActionList};
use helix_stepper::Stepper;
use tracing::debug;

use crate::config::BatchConfig;
use crate::propagator::Propagator;
use crate::result::{PropagationError, PropagationResult};

/// Propagate every track in `starts`, returning one result per track in
/// input order.
///
/// An invalid `config` fails every track with
/// [`PropagationError::InvalidOptions`].
pub fn propagate_batch<S, P>(
    propagator: &Propagator<S>,
    starts: &[P],
    actions: &ActionList,
    aborts: &AbortList,
    config: &BatchConfig,
) -> Vec<Result<PropagationResult, PropagationError>>
where
    S: Stepper,
    P: TrackParameters + Sync,
{
    if let Err(e) = config.validate() {
        return starts
            .iter()
            .map(|_| Err(PropagationError::InvalidOptions(e.clone())))
            .collect();
    }
    if starts.is_empty() {
        return Vec::new();
    }

    let workers = config.worker_count().clamp(1, starts.len());
    debug!(tracks = starts.len(), workers, "batch propagation started");

    let (job_tx, job_rx) = unbounded::<usize>();
    let (result_tx, result_rx) = unbounded();
    for index in 0..starts.len() {
        // The receiver is alive until the scope below ends.
        let _ = job_tx.send(index);
    }
    drop(job_tx);

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for index in job_rx.iter() {
                    let result = propagator.propagate(&starts[index], actions, aborts);
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<Result<PropagationResult, PropagationError>>> =
        (0..starts.len()).map(|_| None).collect();
    for (index, result) in result_rx.try_iter() {
        slots[index] = Some(result);
    }
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, PropagatorOptions};
    use helix_core::{CurvilinearParameters, Vector3};
    use helix_stepper::StraightLineStepper;

    fn propagator() -> Propagator<StraightLineStepper> {
        let opts = PropagatorOptions {
            path_limit: 100.0,
            ..Default::default()
        };
        Propagator::new(StraightLineStepper, opts).unwrap()
    }

    #[test]
    fn results_follow_input_order() {
        let starts: Vec<_> = (0..17)
            .map(|i| CurvilinearParameters::new(Vector3::new(i as f64, 0.0, 0.0), Vector3::y(), 1.0))
            .collect();
        let out = propagate_batch(
            &propagator(),
            &starts,
            &ActionList::empty(),
            &AbortList::empty(),
            &BatchConfig { workers: Some(4) },
        );
        assert_eq!(out.len(), 17);
        for (i, r) in out.iter().enumerate() {
            let r = r.as_ref().unwrap();
            assert_eq!(r.end_parameters.position().x, i as f64);
        }
    }

    #[test]
    fn empty_batch() {
        let out = propagate_batch::<_, CurvilinearParameters>(
            &propagator(),
            &[],
            &ActionList::empty(),
            &AbortList::empty(),
            &BatchConfig::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_config_fails_every_track() {
        let starts = vec![CurvilinearParameters::new(Vector3::zeros(), Vector3::x(), 1.0); 2];
        let out = propagate_batch(
            &propagator(),
            &starts,
            &ActionList::empty(),
            &AbortList::empty(),
            &BatchConfig { workers: Some(0) },
        );
        assert_eq!(out.len(), 2);
        for r in out {
            assert_eq!(
                r.unwrap_err(),
                PropagationError::InvalidOptions(ConfigError::ZeroWorkers)
            );
        }
    }
}
