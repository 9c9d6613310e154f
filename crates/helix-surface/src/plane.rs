//! Flat surface with local `(x, y)` coordinates.

use helix_core::math::{self, local_z_axis};
use helix_core::units::ON_SURFACE_TOLERANCE;
use helix_core::{DetectorElementId, RotationMatrix3, SurfaceId, Transform3, Vector2, Vector3};

use crate::boundary::BoundaryCheck;
use crate::bounds::SurfaceBounds;
use crate::error::SurfaceError;
use crate::intersection::Intersection;
use crate::surface::{planar_intersection, Surface, SurfaceKind};

/// A plane through the placement origin with normal along local z.
#[derive(Clone, Debug)]
pub struct PlaneSurface {
    id: SurfaceId,
    transform: Transform3,
    bounds: SurfaceBounds,
    detector_element: Option<DetectorElementId>,
}

impl PlaneSurface {
    /// A rectangle-bounded plane.
    pub fn rectangle(transform: Transform3, half_x: f64, half_y: f64) -> Result<Self, SurfaceError> {
        Ok(Self::with_bounds(
            transform,
            SurfaceBounds::rectangle(half_x, half_y)?,
        ))
    }

    /// An infinite plane.
    pub fn unbounded(transform: Transform3) -> Self {
        Self::with_bounds(transform, SurfaceBounds::Unbounded)
    }

    fn with_bounds(transform: Transform3, bounds: SurfaceBounds) -> Self {
        Self {
            id: SurfaceId::next(),
            transform,
            bounds,
            detector_element: None,
        }
    }

    /// Associate a detector element.
    pub fn with_detector_element(mut self, element: DetectorElementId) -> Self {
        self.detector_element = Some(element);
        self
    }
}

impl Surface for PlaneSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Plane
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

    fn normal(&self, _position: &Vector3) -> Vector3 {
        local_z_axis(&self.transform)
    }

    fn local_to_global(&self, local: &Vector2, _momentum: &Vector3) -> Vector3 {
        math::to_global(&self.transform, &Vector3::new(local.x, local.y, 0.0))
    }

    fn global_to_local(&self, global: &Vector3, _momentum: &Vector3) -> Option<Vector2> {
        let local = math::to_local(&self.transform, global);
        Some(Vector2::new(local.x, local.y))
    }

    fn is_on_surface(&self, global: &Vector3, check: BoundaryCheck) -> bool {
        let local = math::to_local(&self.transform, global);
        if local.z.abs() > ON_SURFACE_TOLERANCE {
            return false;
        }
        self.bounds.inside(&Vector2::new(local.x, local.y), check)
    }

    fn intersection_estimate(
        &self,
        position: &Vector3,
        direction: &Vector3,
        force_direction: bool,
        check: BoundaryCheck,
    ) -> Intersection {
        match planar_intersection(&self.transform, position, direction, force_direction) {
            Some((point, path, valid)) => {
                let valid = valid && (!check.is_enabled() || self.is_on_surface(&point, check));
                Intersection::new(point, path, valid)
            }
            None => Intersection::invalid(*position),
        }
    }

    fn reference_frame(&self, _position: &Vector3, _momentum: &Vector3) -> RotationMatrix3 {
        self.transform.rotation.to_rotation_matrix().into_inner()
    }

    fn path_correction(&self, _position: &Vector3, direction: &Vector3) -> f64 {
        let cos_alpha = local_z_axis(&self.transform).dot(direction).abs();
        if cos_alpha > 0.0 {
            1.0 / cos_alpha
        } else {
            f64::MAX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use helix_core::math::{placement, translation};

    fn plane_at_x(x: f64) -> PlaneSurface {
        // Normal along +x, local (y, z).
        let t = placement(Vector3::new(x, 0.0, 0.0), Vector3::y(), Vector3::z(), Vector3::x());
        PlaneSurface::rectangle(t, 5.0, 5.0).unwrap()
    }

    #[test]
    fn local_global_round_trip() {
        let s = plane_at_x(10.0);
        let mom = Vector3::new(1.0, 0.2, 0.0);
        let g = s.local_to_global(&Vector2::new(1.0, -2.0), &mom);
        assert!((g - Vector3::new(10.0, 1.0, -2.0)).norm() < 1e-12);
        compliance::assert_round_trip(&s, &[Vector2::new(1.0, -2.0), Vector2::new(-4.0, 4.5)], &mom);
    }

    #[test]
    fn on_surface_checks_distance_then_bounds() {
        let s = plane_at_x(10.0);
        assert!(s.is_on_surface(&Vector3::new(10.0, 1.0, 1.0), BoundaryCheck::Strict));
        assert!(!s.is_on_surface(&Vector3::new(10.1, 1.0, 1.0), BoundaryCheck::Strict));
        assert!(!s.is_on_surface(&Vector3::new(10.0, 6.0, 1.0), BoundaryCheck::Strict));
        assert!(s.is_on_surface(&Vector3::new(10.0, 6.0, 1.0), BoundaryCheck::Disabled));
    }

    #[test]
    fn intersection_ahead_and_behind() {
        let s = plane_at_x(10.0);
        let hit = s.intersection_estimate(
            &Vector3::zeros(),
            &Vector3::x(),
            true,
            BoundaryCheck::Strict,
        );
        assert!(hit.valid);
        assert!((hit.path_length - 10.0).abs() < 1e-12);

        let behind = s.intersection_estimate(
            &Vector3::new(20.0, 0.0, 0.0),
            &Vector3::x(),
            true,
            BoundaryCheck::Strict,
        );
        assert!(!behind.valid);
        assert!((behind.path_length + 10.0).abs() < 1e-12);

        let unforced = s.intersection_estimate(
            &Vector3::new(20.0, 0.0, 0.0),
            &Vector3::x(),
            false,
            BoundaryCheck::Strict,
        );
        assert!(unforced.valid);
    }

    #[test]
    fn parallel_ray_is_invalid() {
        let s = plane_at_x(10.0);
        let hit = s.intersection_estimate(
            &Vector3::zeros(),
            &Vector3::y(),
            false,
            BoundaryCheck::Disabled,
        );
        assert!(!hit.valid);
        assert_eq!(hit.path_length, f64::MAX);
    }

    #[test]
    fn out_of_bounds_hit_is_invalid() {
        let s = plane_at_x(10.0);
        let dir = Vector3::new(1.0, 1.0, 0.0).normalize();
        let hit = s.intersection_estimate(&Vector3::zeros(), &dir, true, BoundaryCheck::Strict);
        assert!(!hit.valid);
        let loose = s.intersection_estimate(&Vector3::zeros(), &dir, true, BoundaryCheck::Disabled);
        assert!(loose.valid);
    }

    #[test]
    fn path_correction_is_inverse_cosine() {
        let s = PlaneSurface::unbounded(translation(Vector3::zeros()));
        let dir = Vector3::new(1.0, 0.0, 1.0).normalize();
        let c = s.path_correction(&Vector3::zeros(), &dir);
        assert!((c - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn reference_frame_is_placement_rotation() {
        let s = plane_at_x(0.0);
        let frame = s.reference_frame(&Vector3::zeros(), &Vector3::x());
        assert!((frame.column(2) - Vector3::x()).norm() < 1e-12);
        compliance::assert_frame_orthonormal(&frame);
    }

    #[test]
    fn intersections_land_on_surface() {
        let s = plane_at_x(3.0);
        compliance::assert_intersections_on_surface(&s);
    }
}
