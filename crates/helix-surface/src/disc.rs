//! Flat annulus with polar local coordinates `(r, φ)`.

use helix_core::math::{self, local_z_axis};
use helix_core::units::ON_SURFACE_TOLERANCE;
use helix_core::{DetectorElementId, RotationMatrix3, SurfaceId, Transform3, Vector2, Vector3};

use crate::boundary::BoundaryCheck;
use crate::bounds::SurfaceBounds;
use crate::error::SurfaceError;
use crate::intersection::Intersection;
use crate::surface::{planar_intersection, Surface, SurfaceKind};

/// A disc in the local xy plane, bounded radially.
///
/// Used for the end caps of cylindrical volumes.
#[derive(Clone, Debug)]
pub struct DiscSurface {
    id: SurfaceId,
    transform: Transform3,
    bounds: SurfaceBounds,
    detector_element: Option<DetectorElementId>,
}

impl DiscSurface {
    /// Annulus `r_min <= r <= r_max` placed by `transform`.
    pub fn new(transform: Transform3, r_min: f64, r_max: f64) -> Result<Self, SurfaceError> {
        Ok(Self {
            id: SurfaceId::next(),
            transform,
            bounds: SurfaceBounds::radial(r_min, r_max)?,
            detector_element: None,
        })
    }

    /// Associate a detector element.
    pub fn with_detector_element(mut self, element: DetectorElementId) -> Self {
        self.detector_element = Some(element);
        self
    }

    fn polar(local: &Vector3) -> Vector2 {
        Vector2::new(math::perp(local), local.y.atan2(local.x))
    }
}

impl Surface for DiscSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Disc
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
        let (sin_phi, cos_phi) = local.y.sin_cos();
        let cartesian = Vector3::new(local.x * cos_phi, local.x * sin_phi, 0.0);
        math::to_global(&self.transform, &cartesian)
    }

    fn global_to_local(&self, global: &Vector3, _momentum: &Vector3) -> Option<Vector2> {
        Some(Self::polar(&math::to_local(&self.transform, global)))
    }

    fn is_on_surface(&self, global: &Vector3, check: BoundaryCheck) -> bool {
        let local = math::to_local(&self.transform, global);
        if local.z.abs() > ON_SURFACE_TOLERANCE {
            return false;
        }
        self.bounds.inside(&Self::polar(&local), check)
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
    use helix_core::math::translation;

    fn disc() -> DiscSurface {
        DiscSurface::new(translation(Vector3::new(0.0, 0.0, 50.0)), 5.0, 20.0).unwrap()
    }

    #[test]
    fn polar_round_trip() {
        let s = disc();
        let mom = Vector3::z();
        let locals = [Vector2::new(10.0, 0.3), Vector2::new(6.0, -2.5)];
        compliance::assert_round_trip(&s, &locals, &mom);
        let g = s.local_to_global(&Vector2::new(10.0, 0.0), &mom);
        assert!((g - Vector3::new(10.0, 0.0, 50.0)).norm() < 1e-12);
    }

    #[test]
    fn hole_is_not_on_surface() {
        let s = disc();
        assert!(!s.is_on_surface(&Vector3::new(1.0, 1.0, 50.0), BoundaryCheck::Strict));
        assert!(s.is_on_surface(&Vector3::new(1.0, 1.0, 50.0), BoundaryCheck::Disabled));
        assert!(s.is_on_surface(&Vector3::new(0.0, 12.0, 50.0), BoundaryCheck::Strict));
    }

    #[test]
    fn intersection_through_annulus() {
        let s = disc();
        let hit = s.intersection_estimate(
            &Vector3::new(10.0, 0.0, 0.0),
            &Vector3::z(),
            true,
            BoundaryCheck::Strict,
        );
        assert!(hit.valid);
        assert!((hit.path_length - 50.0).abs() < 1e-12);

        let through_hole = s.intersection_estimate(
            &Vector3::zeros(),
            &Vector3::z(),
            true,
            BoundaryCheck::Strict,
        );
        assert!(!through_hole.valid);
    }

    #[test]
    fn intersections_land_on_surface() {
        compliance::assert_intersections_on_surface(&disc());
    }

    #[test]
    fn frame_is_orthonormal() {
        compliance::assert_frame_orthonormal(&disc().reference_frame(&Vector3::zeros(), &Vector3::z()));
    }
}
