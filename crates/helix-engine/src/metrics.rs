//! Per-run performance metrics.

/// Counters and timings collected during one propagation run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationMetrics {
    /// Wall-clock time for the whole run.
    pub total_us: u64,
    /// Successful steps.
    pub steps: u64,
    /// Failed steps that were retried with a smaller accuracy bound.
    pub step_retries: u64,
    /// Volume transitions resolved by the navigator.
    pub boundary_crossings: u64,
    /// Time spent in the action list.
    pub action_us: u64,
    /// Time spent in the abort list.
    pub abort_us: u64,
    /// Time spent in navigation (boundary targeting and resolution).
    pub navigation_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = PropagationMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.steps, 0);
        assert_eq!(m.step_retries, 0);
        assert_eq!(m.boundary_crossings, 0);
    }
}
