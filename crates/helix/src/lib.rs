//! Helix: charged-particle track propagation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Helix sub-crates. For most users, adding `helix` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use helix::prelude::*;
//! use helix::types::math::translation;
//!
//! // A 1 m box world with a 2 T solenoid field.
//! let geometry = GeometryBuilder::new(
//!     "world",
//!     translation(Vector3::zeros()),
//!     VolumeBounds::cuboid(1000.0, 1000.0, 1000.0).unwrap(),
//! )
//! .build()
//! .unwrap();
//! let stepper = RungeKuttaStepper::with_defaults(ConstantField::along_z(2.0));
//! let propagator = Propagator::new(stepper, PropagatorOptions::default())
//!     .unwrap()
//!     .with_geometry(Arc::new(geometry));
//!
//! // A 1 GeV/c positive track along x, recording every step.
//! let start = CurvilinearParameters::new(Vector3::zeros(), Vector3::x(), 1.0);
//! let actions = ActionList::builder().with(StepCollector).build().unwrap();
//! let result = propagator
//!     .propagate(&start, &actions, &AbortList::empty())
//!     .unwrap();
//!
//! assert_eq!(result.outcome, PropagationOutcome::LeftWorld);
//! assert!(result.get::<StepCollector>().unwrap().len() as u64 == result.steps);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`helix-core`).
///
/// Vector aliases, identifiers, [`types::NavigationDirection`], the
/// [`types::TrackParameters`] trait with its curvilinear and bound
/// representations, and shared error types.
pub use helix_core as types;

/// Surfaces (`helix-surface`).
///
/// The [`surface::Surface`] trait and the plane, disc, cylinder and line
/// implementations with their bounds and intersection estimates.
pub use helix_surface as surface;

/// Steppers (`helix-stepper`).
///
/// [`stepper::ConstrainedStep`], [`stepper::StepperState`], and the
/// [`stepper::StraightLineStepper`] and [`stepper::RungeKuttaStepper`].
pub use helix_stepper as stepper;

/// Actions and abort conditions (`helix-pipeline`).
pub use helix_pipeline as pipeline;

/// Tracking geometry (`helix-geometry`).
///
/// Build a [`geometry::TrackingGeometry`] with a
/// [`geometry::GeometryBuilder`] and look up volumes by position.
pub use helix_geometry as geometry;

/// Propagation engine (`helix-engine`).
///
/// [`engine::Propagator`] for single tracks, [`engine::propagate_batch`]
/// for many.
pub use helix_engine as engine;

/// Common imports for typical Helix usage.
///
/// ```rust
/// use helix::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use helix_core::{
        BoundParameters, CurvilinearParameters, NavigationDirection, TrackParameters, Vector3,
        VolumeId,
    };

    // Errors
    pub use helix_core::{StateError, StepError};

    // Surfaces
    pub use helix_surface::{BoundaryCheck, CylinderSurface, DiscSurface, LineSurface, PlaneSurface, Surface};

    // Steppers
    pub use helix_stepper::{
        ConstantField, MagneticField, RungeKuttaStepper, Stepper, StraightLineStepper,
    };

    // Pipeline
    pub use helix_pipeline::{
        AbortCondition, AbortList, Action, ActionList, PathLimitReached, StepCollector,
        VolumeTransitionCollector,
    };

    // Geometry
    pub use helix_geometry::{GeometryBuilder, TrackingGeometry, VolumeBounds};

    // Engine
    pub use helix_engine::{
        propagate_batch, BatchConfig, PropagationOutcome, PropagationResult, Propagator,
        PropagatorOptions,
    };
}
