//! The core `Surface` trait and `dyn Surface` downcast support.

use std::any::Any;
use std::fmt;

use helix_core::{DetectorElementId, RotationMatrix3, SurfaceId, Transform3, Vector2, Vector3};

use crate::boundary::BoundaryCheck;
use crate::bounds::SurfaceBounds;
use crate::intersection::Intersection;

/// Denominator below which a ray counts as parallel to a surface's
/// characteristic direction.
pub const PARALLEL_TOLERANCE: f64 = 1e-6;

/// Which concrete surface type a `dyn Surface` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// [`PlaneSurface`](crate::PlaneSurface).
    Plane,
    /// [`DiscSurface`](crate::DiscSurface).
    Disc,
    /// [`CylinderSurface`](crate::CylinderSurface).
    Cylinder,
    /// [`LineSurface`](crate::LineSurface) with straw bounds.
    Straw,
    /// Unbounded [`LineSurface`](crate::LineSurface) through a point.
    Perigee,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plane => "PlaneSurface",
            Self::Disc => "DiscSurface",
            Self::Cylinder => "CylinderSurface",
            Self::Straw => "StrawSurface",
            Self::Perigee => "PerigeeSurface",
        };
        f.write_str(name)
    }
}

/// Central geometric abstraction for navigation and parameter conversion.
///
/// Surfaces are immutable after construction and shared across threads
/// as `Arc<dyn Surface>`; every method is a pure query.
///
/// # Local frames
///
/// Each variant defines its own 2D local parametrization. Some (the line
/// surface) depend on the momentum direction, which is why the mapping
/// methods take one.
pub trait Surface: Any + Send + Sync + fmt::Debug + 'static {
    /// Unique instance identifier.
    fn id(&self) -> SurfaceId;

    /// Concrete surface type.
    fn kind(&self) -> SurfaceKind;

    /// Placement of the surface's local frame.
    fn transform(&self) -> &Transform3;

    /// Bounds in the local frame.
    fn bounds(&self) -> &SurfaceBounds;

    /// Associated detector element, if this is a sensitive surface.
    fn detector_element(&self) -> Option<DetectorElementId>;

    /// Origin of the local frame in global coordinates.
    fn center(&self) -> Vector3 {
        self.transform().translation.vector
    }

    /// Surface normal at a global position on (or near) the surface.
    fn normal(&self, position: &Vector3) -> Vector3;

    /// Map a local position to global coordinates.
    fn local_to_global(&self, local: &Vector2, momentum: &Vector3) -> Vector3;

    /// Map a global position to local coordinates.
    ///
    /// Returns `None` when the position has no local representation.
    fn global_to_local(&self, global: &Vector3, momentum: &Vector3) -> Option<Vector2>;

    /// Whether `global` lies on the surface (and inside its bounds, unless
    /// `check` is disabled).
    fn is_on_surface(&self, global: &Vector3, check: BoundaryCheck) -> bool;

    /// Straight-line intersection of the ray `position + s·direction`
    /// with the surface.
    ///
    /// With `force_direction` set, only solutions ahead of `position`
    /// (`s > 0`) are valid. The bounds are tested with `check`.
    fn intersection_estimate(
        &self,
        position: &Vector3,
        direction: &Vector3,
        force_direction: bool,
        check: BoundaryCheck,
    ) -> Intersection;

    /// Orthonormal measurement frame; columns are the local axes.
    fn reference_frame(&self, position: &Vector3, momentum: &Vector3) -> RotationMatrix3;

    /// Factor converting a local path increment to global path length.
    fn path_correction(&self, position: &Vector3, direction: &Vector3) -> f64;

    /// Human-readable type name.
    fn name(&self) -> String {
        self.kind().to_string()
    }
}

impl dyn Surface {
    /// Attempt to downcast a trait object to a concrete surface type.
    pub fn downcast_ref<T: Surface>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// Solve the ray/plane intersection for a plane through `transform`'s
/// origin with normal along its local z axis.
///
/// Shared by the planar variants.
pub(crate) fn planar_intersection(
    transform: &Transform3,
    position: &Vector3,
    direction: &Vector3,
    force_direction: bool,
) -> Option<(Vector3, f64, bool)> {
    let normal = helix_core::math::local_z_axis(transform);
    let denom = direction.dot(&normal);
    if denom.abs() < PARALLEL_TOLERANCE {
        return None;
    }
    let center = transform.translation.vector;
    let path = normal.dot(&(center - position)) / denom;
    let valid = !force_direction || path > 0.0;
    Some((position + path * direction, path, valid))
}
