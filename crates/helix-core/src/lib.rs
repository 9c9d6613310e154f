//! Core types and traits for the Helix track-propagation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Helix workspace:
//! vector aliases, identifiers, navigation direction, track-parameter
//! representations, and the error types shared between layers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod id;
pub mod math;
pub mod params;
pub mod units;

pub use direction::NavigationDirection;
pub use error::{ConversionError, StateError, StepError};
pub use id::{DetectorElementId, LayerId, SurfaceId, VolumeId};
pub use math::{RotationMatrix3, Transform3, Vector2, Vector3};
pub use params::{BoundParameters, CurvilinearParameters, TrackParameters};
