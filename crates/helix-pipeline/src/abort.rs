//! The [`AbortCondition`] trait and the ordered [`AbortList`].

use std::any::TypeId;

use helix_stepper::StepperState;
use smallvec::SmallVec;

use crate::error::PipelineError;
use crate::results::ResultAggregate;
use crate::state::PropagationState;

/// A predicate that ends the run when it returns `true`.
///
/// Conditions may assert the
/// [`UserLimit`](helix_stepper::StepConstraint::UserLimit) bound on the
/// stepper so the next step does not overshoot the point where they fire.
pub trait AbortCondition: Send + Sync + 'static {
    /// Human-readable name, reported in the run outcome.
    fn name(&self) -> &str;

    /// Whether the run should stop now.
    fn check(
        &self,
        results: &ResultAggregate,
        propagation: &PropagationState,
        stepper: &mut StepperState,
    ) -> bool;
}

struct Entry {
    type_id: TypeId,
    condition: Box<dyn AbortCondition>,
}

/// Abort conditions in declaration order, fixed at build time.
#[derive(Default)]
pub struct AbortList {
    conditions: Vec<Entry>,
}

impl AbortList {
    /// Start building a list.
    pub fn builder() -> AbortListBuilder {
        AbortListBuilder::default()
    }

    /// A list that never aborts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Evaluate conditions in order, stopping at the first that fires.
    ///
    /// Returns the name of the condition that fired.
    pub fn check(
        &self,
        results: &ResultAggregate,
        propagation: &PropagationState,
        stepper: &mut StepperState,
    ) -> Option<&str> {
        self.conditions
            .iter()
            .find(|e| e.condition.check(results, propagation, stepper))
            .map(|e| e.condition.name())
    }

    /// Whether any condition fires; same short-circuiting as
    /// [`check`](Self::check).
    pub fn should_abort(
        &self,
        results: &ResultAggregate,
        propagation: &PropagationState,
        stepper: &mut StepperState,
    ) -> bool {
        self.check(results, propagation, stepper).is_some()
    }

    /// Condition names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|e| e.condition.name())
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl std::fmt::Debug for AbortList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builder for [`AbortList`].
#[derive(Default)]
pub struct AbortListBuilder {
    conditions: Vec<Entry>,
}

impl AbortListBuilder {
    /// Append a condition.
    pub fn with<C: AbortCondition>(mut self, condition: C) -> Self {
        self.conditions.push(Entry {
            type_id: TypeId::of::<C>(),
            condition: Box::new(condition),
        });
        self
    }

    /// Finish the list, rejecting repeated condition types.
    pub fn build(self) -> Result<AbortList, PipelineError> {
        let mut seen: SmallVec<[TypeId; 8]> = SmallVec::new();
        for entry in &self.conditions {
            if seen.contains(&entry.type_id) {
                return Err(PipelineError::DuplicateAbort {
                    name: entry.condition.name().to_string(),
                });
            }
            seen.push(entry.type_id);
        }
        Ok(AbortList {
            conditions: self.conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_core::{CurvilinearParameters, NavigationDirection, Vector3};

    struct Never;
    struct Always;
    struct Explodes;

    impl AbortCondition for Never {
        fn name(&self) -> &str {
            "never"
        }
        fn check(&self, _: &ResultAggregate, _: &PropagationState, _: &mut StepperState) -> bool {
            false
        }
    }

    impl AbortCondition for Always {
        fn name(&self) -> &str {
            "always"
        }
        fn check(&self, _: &ResultAggregate, _: &PropagationState, _: &mut StepperState) -> bool {
            true
        }
    }

    impl AbortCondition for Explodes {
        fn name(&self) -> &str {
            "explodes"
        }
        fn check(&self, _: &ResultAggregate, _: &PropagationState, _: &mut StepperState) -> bool {
            panic!("evaluated past the first firing condition")
        }
    }

    fn stepper() -> StepperState {
        let p = CurvilinearParameters::new(Vector3::zeros(), Vector3::x(), 1.0);
        StepperState::new(&p, NavigationDirection::Forward, 1.0).unwrap()
    }

    #[test]
    fn short_circuits_at_first_true() {
        let list = AbortList::builder()
            .with(Never)
            .with(Always)
            .with(Explodes)
            .build()
            .unwrap();
        let results = ResultAggregate::default();
        let state = PropagationState::default();
        let mut s = stepper();
        assert_eq!(list.check(&results, &state, &mut s), Some("always"));
        assert!(list.should_abort(&results, &state, &mut s));
    }

    #[test]
    fn nothing_fires() {
        let list = AbortList::builder().with(Never).build().unwrap();
        let mut s = stepper();
        assert_eq!(
            list.check(&ResultAggregate::default(), &PropagationState::default(), &mut s),
            None
        );
        assert!(!AbortList::empty().should_abort(
            &ResultAggregate::default(),
            &PropagationState::default(),
            &mut s
        ));
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let err = AbortList::builder().with(Never).with(Always).with(Never).build().unwrap_err();
        assert_eq!(
            err,
            PipelineError::DuplicateAbort {
                name: "never".to_string()
            }
        );
        assert_eq!(err.to_string(), "abort condition 'never' registered more than once");
    }
}
