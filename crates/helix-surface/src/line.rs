//! Line (straw/wire) surface and its unbounded perigee variant.
//!
//! The local frame is `(signed r, z)`: `z` is the position along the line
//! and `r` the distance from it, signed by whether the position lies on
//! the `axis × momentum` side of the line.

use helix_core::math::{self, local_z_axis};
use helix_core::{DetectorElementId, RotationMatrix3, SurfaceId, Transform3, Vector2, Vector3};

use crate::boundary::BoundaryCheck;
use crate::bounds::SurfaceBounds;
use crate::error::SurfaceError;
use crate::intersection::Intersection;
use crate::surface::{Surface, SurfaceKind, PARALLEL_TOLERANCE};

/// A straight line through the placement origin along local z.
#[derive(Clone, Debug)]
pub struct LineSurface {
    id: SurfaceId,
    kind: SurfaceKind,
    transform: Transform3,
    bounds: SurfaceBounds,
    detector_element: Option<DetectorElementId>,
}

impl LineSurface {
    /// A straw of `radius` and half-length `half_z`.
    pub fn straw(transform: Transform3, radius: f64, half_z: f64) -> Result<Self, SurfaceError> {
        Ok(Self {
            id: SurfaceId::next(),
            kind: SurfaceKind::Straw,
            transform,
            bounds: SurfaceBounds::line(radius, half_z)?,
            detector_element: None,
        })
    }

    /// An unbounded line through `point` parallel to the global z axis.
    pub fn perigee(point: Vector3) -> Self {
        Self {
            id: SurfaceId::next(),
            kind: SurfaceKind::Perigee,
            transform: math::translation(point),
            bounds: SurfaceBounds::Unbounded,
            detector_element: None,
        }
    }

    /// Associate a detector element.
    pub fn with_detector_element(mut self, element: DetectorElementId) -> Self {
        self.detector_element = Some(element);
        self
    }

    /// Global direction of the line.
    pub fn line_direction(&self) -> Vector3 {
        local_z_axis(&self.transform)
    }
}

impl Surface for LineSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn transform(&self) -> &Transform3 {
        &self.transform
    }

    fn bounds(&self) -> &SurfaceBounds {
        &self.bounds
    }

    fn detector_element(&self) -> Option<DetectorElementId> {
        self.detector_element
    }

    /// The line direction; closest to a normal for a one-dimensional surface.
    fn normal(&self, _position: &Vector3) -> Vector3 {
        self.line_direction()
    }

    fn local_to_global(&self, local: &Vector2, momentum: &Vector3) -> Vector3 {
        let radius_axis = self.line_direction().cross(momentum);
        let along = math::to_global(&self.transform, &Vector3::new(0.0, 0.0, local.y));
        let norm = radius_axis.norm();
        if norm > 0.0 {
            along + local.x * (radius_axis / norm)
        } else {
            along
        }
    }

    fn global_to_local(&self, global: &Vector3, momentum: &Vector3) -> Option<Vector2> {
        let local = math::to_local(&self.transform, global);
        let offset = global - self.center();
        let sign = if self.line_direction().cross(momentum).dot(&offset) < 0.0 {
            -1.0
        } else {
            1.0
        };
        Some(Vector2::new(sign * math::perp(&local), local.z))
    }

    fn is_on_surface(&self, global: &Vector3, check: BoundaryCheck) -> bool {
        if !check.is_enabled() {
            return true;
        }
        if !self.bounds.is_bounded() && self.detector_element.is_none() {
            return true;
        }
        let local = math::to_local(&self.transform, global);
        self.bounds
            .inside(&Vector2::new(math::perp(&local), local.z), check)
    }

    /// Point of closest approach between the ray and the line.
    fn intersection_estimate(
        &self,
        position: &Vector3,
        direction: &Vector3,
        force_direction: bool,
        check: BoundaryCheck,
    ) -> Intersection {
        let ea = direction;
        let eb = self.line_direction();
        let mab = self.center() - position;
        let ea_eb = ea.dot(&eb);
        let denom = 1.0 - ea_eb * ea_eb;
        if denom.abs() <= PARALLEL_TOLERANCE {
            return Intersection::invalid(*position);
        }
        let lambda = (mab.dot(ea) - mab.dot(&eb) * ea_eb) / denom;
        let mut valid = !force_direction || lambda > 0.0;
        let point = position + lambda * ea;
        if check.is_enabled() {
            valid = valid && self.is_on_surface(&point, check);
        }
        Intersection::new(point, lambda, valid)
    }

    fn reference_frame(&self, _position: &Vector3, momentum: &Vector3) -> RotationMatrix3 {
        let meas_y = self.line_direction();
        let meas_x = meas_y.cross(momentum).normalize();
        let meas_depth = meas_x.cross(&meas_y);
        RotationMatrix3::from_columns(&[meas_x, meas_y, meas_depth])
    }

    /// Local radial and global path coincide along the line.
    fn path_correction(&self, _position: &Vector3, _direction: &Vector3) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use helix_core::math::{placement, translation};
    use proptest::prelude::*;

    fn straw() -> LineSurface {
        LineSurface::straw(translation(Vector3::zeros()), 10.0, 100.0).unwrap()
    }

    #[test]
    fn round_trip_in_measurement_plane() {
        let s = straw();
        let point = Vector3::new(5.0, 0.0, 3.0);
        let mom = Vector3::new(0.0, 1.0, 0.0);
        let local = s.global_to_local(&point, &mom).unwrap();
        assert!((local - Vector2::new(-5.0, 3.0)).norm() < 1e-12);
        let back = s.local_to_global(&local, &mom);
        assert!((back - point).norm() < 1e-12);
    }

    #[test]
    fn sign_follows_axis_cross_momentum() {
        let s = straw();
        let mom = Vector3::new(1.0, 0.0, 0.0);
        // z × x = +y, so points at +y are positive.
        let plus = s.global_to_local(&Vector3::new(0.0, 4.0, 1.0), &mom).unwrap();
        let minus = s.global_to_local(&Vector3::new(0.0, -4.0, 1.0), &mom).unwrap();
        assert_eq!(plus, Vector2::new(4.0, 1.0));
        assert_eq!(minus, Vector2::new(-4.0, 1.0));
    }

    #[test]
    fn local_to_global_ignores_radial_component_of_input_point() {
        // With the momentum along x the measurement plane is y-z; the
        // radius along x collapses onto the +y axis.
        let s = straw();
        let mom = Vector3::new(1.0, 0.0, 0.0);
        let local = s.global_to_local(&Vector3::new(5.0, 0.0, 3.0), &mom).unwrap();
        assert_eq!(local, Vector2::new(5.0, 3.0));
        let g = s.local_to_global(&local, &mom);
        assert!((g - Vector3::new(0.0, 5.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn parallel_ray_is_invalid_with_sentinel() {
        let s = straw();
        let start = Vector3::new(1.0, 2.0, 3.0);
        let hit = s.intersection_estimate(&start, &Vector3::z(), false, BoundaryCheck::Disabled);
        assert!(!hit.valid);
        assert_eq!(hit.path_length, f64::MAX);
        assert_eq!(hit.position, start);
    }

    #[test]
    fn closest_approach_on_perpendicular_ray() {
        let s = straw();
        let hit = s.intersection_estimate(
            &Vector3::new(-20.0, 3.0, 7.0),
            &Vector3::x(),
            true,
            BoundaryCheck::Strict,
        );
        assert!(hit.valid);
        assert!((hit.path_length - 20.0).abs() < 1e-12);
        assert!((hit.position - Vector3::new(0.0, 3.0, 7.0)).norm() < 1e-12);
    }

    #[test]
    fn forced_direction_rejects_behind() {
        let s = straw();
        let hit = s.intersection_estimate(
            &Vector3::new(20.0, 3.0, 7.0),
            &Vector3::x(),
            true,
            BoundaryCheck::Disabled,
        );
        assert!(!hit.valid);
        assert!((hit.path_length + 20.0).abs() < 1e-12);
    }

    #[test]
    fn outside_straw_radius_fails_bounds() {
        let s = straw();
        let hit = s.intersection_estimate(
            &Vector3::new(-20.0, 12.0, 7.0),
            &Vector3::x(),
            true,
            BoundaryCheck::Strict,
        );
        assert!(!hit.valid);
    }

    #[test]
    fn on_surface_rules() {
        let s = straw();
        assert!(s.is_on_surface(&Vector3::new(3.0, 4.0, 50.0), BoundaryCheck::Strict));
        assert!(!s.is_on_surface(&Vector3::new(3.0, 4.0, 150.0), BoundaryCheck::Strict));
        assert!(s.is_on_surface(&Vector3::new(300.0, 4.0, 150.0), BoundaryCheck::Disabled));

        let perigee = LineSurface::perigee(Vector3::zeros());
        assert_eq!(perigee.kind(), SurfaceKind::Perigee);
        assert!(perigee.is_on_surface(&Vector3::new(1e6, 0.0, 0.0), BoundaryCheck::Strict));
    }

    #[test]
    fn path_correction_is_one() {
        let s = straw();
        assert_eq!(
            s.path_correction(&Vector3::zeros(), &Vector3::new(0.3, 0.4, 0.5).normalize()),
            1.0
        );
    }

    #[test]
    fn reference_frame_columns() {
        let s = straw();
        let frame = s.reference_frame(&Vector3::zeros(), &Vector3::x());
        compliance::assert_frame_orthonormal(&frame);
        assert!((frame.column(0) - Vector3::y()).norm() < 1e-12);
        assert!((frame.column(1) - Vector3::z()).norm() < 1e-12);
        assert!((frame.column(2) - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn tilted_straw_round_trip() {
        let t = placement(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::y(),
            Vector3::z(),
            Vector3::x(),
        );
        let s = LineSurface::straw(t, 10.0, 100.0).unwrap();
        let locals = [Vector2::new(4.0, 20.0), Vector2::new(-7.5, -90.0)];
        compliance::assert_round_trip(&s, &locals, &Vector3::new(0.1, 1.0, 0.3));
        compliance::assert_intersections_on_surface(&s);
    }

    proptest! {
        #[test]
        fn round_trip_for_points_in_measurement_plane(
            r in -9.9f64..9.9,
            z in -99.0f64..99.0,
            phi in -3.1f64..3.1,
        ) {
            // Momentum perpendicular to the axis; the radius axis is then
            // axis × momentum and every local point maps back exactly.
            let s = straw();
            let mom = Vector3::new(phi.cos(), phi.sin(), 0.0);
            let local = Vector2::new(r, z);
            let global = s.local_to_global(&local, &mom);
            let back = s.global_to_local(&global, &mom).unwrap();
            prop_assert!((back - local).norm() < 1e-9);
            prop_assert!(s.is_on_surface(&global, BoundaryCheck::Strict));
        }
    }
}
