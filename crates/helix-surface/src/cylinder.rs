//! Cylinder surface with local `(rφ, z)` coordinates.
//!
//! The cylinder axis is the placement's local z axis. This is the
//! representative curved surface: its intersection is a quadratic with up
//! to two solutions, and its normal depends on position.

use helix_core::math::{self, local_z_axis};
use helix_core::units::ON_SURFACE_TOLERANCE;
use helix_core::{DetectorElementId, RotationMatrix3, SurfaceId, Transform3, Vector2, Vector3};

use crate::boundary::BoundaryCheck;
use crate::bounds::SurfaceBounds;
use crate::error::SurfaceError;
use crate::intersection::Intersection;
use crate::surface::{Surface, SurfaceKind, PARALLEL_TOLERANCE};

/// A finite cylinder of fixed radius around the local z axis.
#[derive(Clone, Debug)]
pub struct CylinderSurface {
    id: SurfaceId,
    transform: Transform3,
    bounds: SurfaceBounds,
    radius: f64,
    detector_element: Option<DetectorElementId>,
}

impl CylinderSurface {
    /// Cylinder of `radius` spanning `|z| <= half_z` in its local frame.
    pub fn new(transform: Transform3, radius: f64, half_z: f64) -> Result<Self, SurfaceError> {
        Ok(Self {
            id: SurfaceId::next(),
            transform,
            bounds: SurfaceBounds::cylinder(radius, half_z)?,
            radius,
            detector_element: None,
        })
    }

    /// Associate a detector element.
    pub fn with_detector_element(mut self, element: DetectorElementId) -> Self {
        self.detector_element = Some(element);
        self
    }

    /// Cylinder radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn radial_local(local: &Vector3) -> Vector3 {
        let r = math::perp(local);
        if r > 0.0 {
            Vector3::new(local.x / r, local.y / r, 0.0)
        } else {
            Vector3::x()
        }
    }
}

impl Surface for CylinderSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Cylinder
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

    /// Outward radial direction at `position`.
    fn normal(&self, position: &Vector3) -> Vector3 {
        let local = math::to_local(&self.transform, position);
        math::rotate_to_global(&self.transform, &Self::radial_local(&local))
    }

    fn local_to_global(&self, local: &Vector2, _momentum: &Vector3) -> Vector3 {
        let phi = local.x / self.radius;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let cartesian = Vector3::new(self.radius * cos_phi, self.radius * sin_phi, local.y);
        math::to_global(&self.transform, &cartesian)
    }

    fn global_to_local(&self, global: &Vector3, _momentum: &Vector3) -> Option<Vector2> {
        let local = math::to_local(&self.transform, global);
        Some(Vector2::new(self.radius * local.y.atan2(local.x), local.z))
    }

    fn is_on_surface(&self, global: &Vector3, check: BoundaryCheck) -> bool {
        let local = math::to_local(&self.transform, global);
        if (math::perp(&local) - self.radius).abs() > ON_SURFACE_TOLERANCE {
            return false;
        }
        let loc = Vector2::new(self.radius * local.y.atan2(local.x), local.z);
        self.bounds.inside(&loc, check)
    }

    fn intersection_estimate(
        &self,
        position: &Vector3,
        direction: &Vector3,
        force_direction: bool,
        check: BoundaryCheck,
    ) -> Intersection {
        let p = math::to_local(&self.transform, position);
        let d = math::rotate_to_local(&self.transform, direction);
        let a = d.x * d.x + d.y * d.y;
        if a < PARALLEL_TOLERANCE {
            return Intersection::invalid(*position);
        }
        let b = 2.0 * (p.x * d.x + p.y * d.y);
        let c = p.x * p.x + p.y * p.y - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Intersection::invalid(*position);
        }
        let root = discriminant.sqrt();
        let s1 = (-b - root) / (2.0 * a);
        let s2 = (-b + root) / (2.0 * a);
        if force_direction {
            // Nearest solution ahead within bounds; a start on the surface
            // itself is skipped.
            let ahead = [s1, s2].into_iter().filter(|s| *s > ON_SURFACE_TOLERANCE);
            let mut nearest = None;
            for path in ahead {
                let point = position + path * direction;
                if !check.is_enabled() || self.is_on_surface(&point, check) {
                    return Intersection::new(point, path, true);
                }
                if nearest.is_none() {
                    nearest = Some(Intersection::new(point, path, false));
                }
            }
            return nearest.unwrap_or_else(|| {
                Intersection::new(position + s2 * direction, s2, false)
            });
        }
        let path = if s1.abs() <= s2.abs() { s1 } else { s2 };
        let point = position + path * direction;
        let valid = !check.is_enabled() || self.is_on_surface(&point, check);
        Intersection::new(point, path, valid)
    }

    fn reference_frame(&self, position: &Vector3, _momentum: &Vector3) -> RotationMatrix3 {
        let meas_y = local_z_axis(&self.transform);
        let meas_depth = self.normal(position);
        let meas_x = meas_y.cross(&meas_depth);
        RotationMatrix3::from_columns(&[meas_x, meas_y, meas_depth])
    }

    fn path_correction(&self, position: &Vector3, direction: &Vector3) -> f64 {
        let cos_alpha = self.normal(position).dot(direction).abs();
        if cos_alpha > 0.0 {
            1.0 / cos_alpha
        } else {
            f64::MAX
        }
    }
}
