//! Surface trait compliance test helpers.
//!
//! These functions verify that a Surface implementation satisfies the
//! invariants required by the trait contract. Reused across all variant
//! test modules.

use helix_core::{RotationMatrix3, Vector2, Vector3};

use crate::boundary::BoundaryCheck;
use crate::surface::Surface;

const TOL: f64 = 1e-9;

/// Assert that `global_to_local(local_to_global(l)) == l` for every local point.
pub fn assert_round_trip(surface: &dyn Surface, locals: &[Vector2], momentum: &Vector3) {
    for local in locals {
        let global = surface.local_to_global(local, momentum);
        let back = surface
            .global_to_local(&global, momentum)
            .unwrap_or_else(|| panic!("{}: no local representation for {global:?}", surface.name()));
        assert!(
            (back - local).norm() < TOL,
            "{}: round trip {local:?} -> {global:?} -> {back:?}",
            surface.name()
        );
        assert!(
            surface.is_on_surface(&global, BoundaryCheck::Disabled),
            "{}: mapped point {global:?} is not on the surface",
            surface.name()
        );
    }
}

/// Assert that a measurement frame is a proper rotation.
pub fn assert_frame_orthonormal(frame: &RotationMatrix3) {
    let identity = frame.transpose() * frame;
    assert!(
        (identity - RotationMatrix3::identity()).norm() < TOL,
        "frame is not orthonormal: {frame:?}"
    );
    assert!(
        (frame.determinant() - 1.0).abs() < TOL,
        "frame is not right-handed: {frame:?}"
    );
}

/// Assert that every valid intersection from a fan of rays aimed near the
/// surface centre lies on the surface and at the reported path length.
pub fn assert_intersections_on_surface(surface: &dyn Surface) {
    let center = surface.center();
    let offset = Vector3::new(0.3, -0.2, 0.1);
    let mut valid = 0usize;
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                let origin = center + Vector3::new(20.0 * sx, 15.0 * sy, 7.0 * sz);
                let direction = (center + offset - origin).normalize();
                let hit = surface.intersection_estimate(
                    &origin,
                    &direction,
                    true,
                    BoundaryCheck::Disabled,
                );
                if !hit.valid {
                    continue;
                }
                valid += 1;
                assert!(
                    surface.is_on_surface(&hit.position, BoundaryCheck::Disabled),
                    "{}: intersection {:?} is off the surface",
                    surface.name(),
                    hit.position
                );
                let expected = origin + hit.path_length * direction;
                assert!(
                    (expected - hit.position).norm() < TOL,
                    "{}: path length {} inconsistent with point {:?}",
                    surface.name(),
                    hit.path_length,
                    hit.position
                );
                assert!(hit.path_length > 0.0, "forced intersection behind the origin");
            }
        }
    }
    assert!(valid > 0, "{}: no ray produced a valid intersection", surface.name());
}
