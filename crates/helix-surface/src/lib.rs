//! Surfaces for the Helix propagation engine.
//!
//! This crate defines the [`Surface`] trait and its concrete variants.
//! Every navigation query goes through a surface's local/global mapping,
//! its on-surface test, or its ray intersection.
//!
//! # Variants
//!
//! - [`PlaneSurface`]: flat surface, optionally rectangle-bounded
//! - [`DiscSurface`]: flat surface with radial bounds and polar local frame
//! - [`CylinderSurface`]: curved surface with `(rφ, z)` local frame
//! - [`LineSurface`]: straw/wire surface with `(signed r, z)` local frame;
//!   [`LineSurface::perigee`] builds the unbounded beam-line variant

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod bounds;
pub mod cylinder;
pub mod disc;
pub mod error;
pub mod intersection;
pub mod line;
pub mod plane;
pub mod surface;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::BoundaryCheck;
pub use bounds::SurfaceBounds;
pub use cylinder::CylinderSurface;
pub use disc::DiscSurface;
pub use error::SurfaceError;
pub use intersection::Intersection;
pub use line::LineSurface;
pub use plane::PlaneSurface;
pub use surface::{Surface, SurfaceKind};
