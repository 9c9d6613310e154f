//! Action and abort pipelines for Helix propagation runs.
//!
//! An [`ActionList`] is an ordered, build-time-fixed sequence of
//! [`Action`]s invoked after every step; each writes a typed output into
//! the run's [`ResultAggregate`] and may read the outputs of actions
//! declared before it. An [`AbortList`] is an ordered sequence of
//! [`AbortCondition`]s evaluated after the actions; the first one that
//! fires ends the run.
//!
//! Both lists are built through builders that reject duplicate component
//! types, so a type uniquely identifies its slot in the aggregate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod abort;
pub mod action;
pub mod aborts;
pub mod actions;
pub mod error;
pub mod results;
pub mod state;

pub use abort::{AbortCondition, AbortList, AbortListBuilder};
pub use action::{Action, ActionList, ActionListBuilder};
pub use aborts::{MomentumBelow, PathLimitReached, StepCountReached};
pub use actions::{StepCollector, StepRecord, VolumeTransition, VolumeTransitionCollector};
pub use error::PipelineError;
pub use results::{ResultAggregate, ResultView};
pub use state::PropagationState;
