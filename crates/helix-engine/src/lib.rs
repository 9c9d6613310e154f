//! The Helix propagation engine.
//!
//! A [`Propagator`] drives a [`Stepper`](helix_stepper::Stepper) through
//! an optional [`TrackingGeometry`](helix_geometry::TrackingGeometry) one
//! constrained step at a time. Before each step the [`Navigator`] asserts
//! the distance to the next volume boundary, the configured limits assert
//! theirs, and the stepper takes at most the tightest of them. After each
//! step the navigator resolves volume transitions, the
//! [`ActionList`](helix_pipeline::ActionList) observes, and the
//! [`AbortList`](helix_pipeline::AbortList) decides whether to stop.
//!
//! [`propagate_batch`] fans independent tracks out over a scoped worker
//! pool and returns results in input order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod metrics;
pub mod navigator;
pub mod propagator;
pub mod result;

pub use batch::propagate_batch;
pub use config::{BatchConfig, ConfigError, PropagatorOptions};
pub use metrics::PropagationMetrics;
pub use navigator::{NavigationStatus, Navigator};
pub use propagator::Propagator;
pub use result::{PropagationError, PropagationOutcome, PropagationResult};
