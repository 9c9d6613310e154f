//! Test fixtures for Helix development.
//!
//! Provides reference geometries, start parameters, and deliberately
//! misbehaving stepper, action and abort implementations for exercising
//! the engine's error paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use helix_core::math::direction_from_angles;
use helix_core::{CurvilinearParameters, Vector3};

/// Track from the origin with momentum `p` (GeV/c) at angles `phi`,
/// `theta`.
pub fn track_from_origin(phi: f64, theta: f64, p: f64, charge: f64) -> CurvilinearParameters {
    CurvilinearParameters::new(Vector3::zeros(), p * direction_from_angles(phi, theta), charge)
}

/// Track at `position` with momentum vector `momentum`.
pub fn track_at(position: Vector3, momentum: Vector3, charge: f64) -> CurvilinearParameters {
    CurvilinearParameters::new(position, momentum, charge)
}
