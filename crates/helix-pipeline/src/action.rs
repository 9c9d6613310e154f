//! The [`Action`] trait and the ordered [`ActionList`].

use std::any::{Any, TypeId};

use helix_stepper::StepperState;
use smallvec::SmallVec;

use crate::error::PipelineError;
use crate::results::{ResultAggregate, ResultEntry, ResultView};
use crate::state::PropagationState;

/// An observer invoked after every step.
///
/// Actions may inspect and modify both states and write their own
/// [`Output`](Action::Output). They see only the outputs of actions
/// declared before them.
pub trait Action: Send + Sync + 'static {
    /// Per-run result type, default-constructed at run start.
    type Output: Default + Send + 'static;

    /// Human-readable name for logs and errors.
    fn name(&self) -> &str;

    /// Observe the current step.
    fn act(
        &self,
        propagation: &mut PropagationState,
        stepper: &mut StepperState,
        output: &mut Self::Output,
        earlier: &ResultView<'_>,
    );
}

// ── Type erasure ───────────────────────────────────────────────────

trait ErasedAction: Send + Sync {
    fn action_type(&self) -> TypeId;
    fn action_name(&self) -> &str;
    fn new_output(&self) -> Box<dyn Any + Send>;
    fn act_erased(
        &self,
        propagation: &mut PropagationState,
        stepper: &mut StepperState,
        output: &mut (dyn Any + Send),
        earlier: &ResultView<'_>,
    );
}

impl<A: Action> ErasedAction for A {
    fn action_type(&self) -> TypeId {
        TypeId::of::<A>()
    }

    fn action_name(&self) -> &str {
        self.name()
    }

    fn new_output(&self) -> Box<dyn Any + Send> {
        Box::new(A::Output::default())
    }

    fn act_erased(
        &self,
        propagation: &mut PropagationState,
        stepper: &mut StepperState,
        output: &mut (dyn Any + Send),
        earlier: &ResultView<'_>,
    ) {
        let output = output.downcast_mut::<A::Output>();
        debug_assert!(output.is_some(), "output type mismatch for '{}'", self.name());
        if let Some(output) = output {
            self.act(propagation, stepper, output, earlier);
        }
    }
}

// ── List ───────────────────────────────────────────────────────────

/// Actions in declaration order, fixed at build time.
#[derive(Default)]
pub struct ActionList {
    actions: Vec<Box<dyn ErasedAction>>,
}

impl ActionList {
    /// Start building a list.
    pub fn builder() -> ActionListBuilder {
        ActionListBuilder::default()
    }

    /// A list with no actions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fresh, default-initialised outputs for one run.
    pub fn new_results(&self) -> ResultAggregate {
        ResultAggregate {
            entries: self
                .actions
                .iter()
                .map(|a| ResultEntry {
                    type_id: a.action_type(),
                    name: a.action_name().to_string(),
                    value: a.new_output(),
                })
                .collect(),
        }
    }

    /// Invoke every action in order.
    ///
    /// `results` must come from [`new_results`](Self::new_results) on this
    /// list; slots that do not line up with an action are skipped.
    pub fn run(
        &self,
        propagation: &mut PropagationState,
        stepper: &mut StepperState,
        results: &mut ResultAggregate,
    ) {
        debug_assert_eq!(
            results.entries.len(),
            self.actions.len(),
            "result aggregate was not created by this action list"
        );
        let len = results.entries.len();
        for (index, action) in self.actions.iter().enumerate() {
            let (earlier, rest) = results.entries.split_at_mut(index.min(len));
            let Some(slot) = rest.first_mut() else {
                break;
            };
            if slot.type_id != action.action_type() {
                debug_assert!(false, "result slot {index} does not belong to '{}'", action.action_name());
                continue;
            }
            let view = ResultView { entries: earlier };
            action.act_erased(propagation, stepper, slot.value.as_mut(), &view);
        }
    }

    /// Action names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.action_name())
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Debug for ActionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builder for [`ActionList`].
#[derive(Default)]
pub struct ActionListBuilder {
    actions: Vec<Box<dyn ErasedAction>>,
}

impl ActionListBuilder {
    /// Append an action.
    pub fn with<A: Action>(mut self, action: A) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Finish the list, rejecting repeated action types.
    pub fn build(self) -> Result<ActionList, PipelineError> {
        let mut seen: SmallVec<[TypeId; 8]> = SmallVec::new();
        for action in &self.actions {
            let id = action.action_type();
            if seen.contains(&id) {
                return Err(PipelineError::DuplicateAction {
                    name: action.action_name().to_string(),
                });
            }
            seen.push(id);
        }
        Ok(ActionList {
            actions: self.actions,
        })
    }
}
