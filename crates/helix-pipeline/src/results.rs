//! Per-run storage for action outputs.

use std::any::{Any, TypeId};

use smallvec::SmallVec;

use crate::action::Action;

pub(crate) struct ResultEntry {
    pub(crate) type_id: TypeId,
    pub(crate) name: String,
    pub(crate) value: Box<dyn Any + Send>,
}

/// One typed output slot per action, in declaration order.
///
/// Allocated once per run by
/// [`ActionList::new_results`](crate::ActionList::new_results).
#[derive(Default)]
pub struct ResultAggregate {
    pub(crate) entries: SmallVec<[ResultEntry; 4]>,
}

impl ResultAggregate {
    /// Output of action `A`, if `A` is part of the list.
    pub fn get<A: Action>(&self) -> Option<&A::Output> {
        ResultView {
            entries: &self.entries,
        }
        .get::<A>()
    }

    /// Mutable output of action `A`.
    pub fn get_mut<A: Action>(&mut self) -> Option<&mut A::Output> {
        let id = TypeId::of::<A>();
        self.entries
            .iter_mut()
            .find(|e| e.type_id == id)
            .and_then(|e| e.value.downcast_mut::<A::Output>())
    }

    /// Move the output of `A` out, leaving its default behind.
    pub fn take<A: Action>(&mut self) -> Option<A::Output> {
        self.get_mut::<A>().map(std::mem::take)
    }

    /// Action names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ResultAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Read-only view of the outputs written by earlier actions.
#[derive(Clone, Copy)]
pub struct ResultView<'a> {
    pub(crate) entries: &'a [ResultEntry],
}

impl<'a> ResultView<'a> {
    /// Output of `A`, if `A` precedes the current action.
    pub fn get<A: Action>(&self) -> Option<&'a A::Output> {
        let id = TypeId::of::<A>();
        self.entries
            .iter()
            .find(|e| e.type_id == id)
            .and_then(|e| e.value.downcast_ref::<A::Output>())
    }

    /// Number of visible outputs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no earlier outputs are visible.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
