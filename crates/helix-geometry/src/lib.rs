//! Tracking geometry for Helix: a read-only tree of nested volumes.
//!
//! A [`TrackingGeometry`] owns an arena of [`TrackingVolume`]s addressed
//! by [`VolumeId`](helix_core::VolumeId), rooted at a single world volume.
//! Each volume carries outward-oriented [`BoundarySurface`]s that record
//! which volume lies on either side, plus optional [`Layer`]s. The
//! geometry is built once by a [`GeometryBuilder`] and is `Send + Sync`,
//! so many propagation runs can share it behind an `Arc`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod bounds;
pub mod builder;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod volume;

pub use boundary::{BoundaryCrossing, BoundarySurface};
pub use bounds::VolumeBounds;
pub use builder::GeometryBuilder;
pub use error::GeometryError;
pub use geometry::{TrackingGeometry, DETACHED_TOLERANCE};
pub use layer::Layer;
pub use volume::TrackingVolume;
