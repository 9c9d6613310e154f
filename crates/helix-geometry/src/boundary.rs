//! Volume boundary surfaces and their attachments.

use std::sync::Arc;

use helix_core::{NavigationDirection, Vector3, VolumeId};
use helix_surface::{BoundaryCheck, Surface};

/// Tolerance on local coordinates when testing whether a point lies on a
/// boundary.
const ON_BOUNDARY_TOLERANCE: f64 = 1e-3;

/// A surface bounding a volume, with the volumes attached on either side.
///
/// `along` is the volume entered when moving along the surface normal,
/// `opposite` the one entered when moving against it. `None` means
/// leaving the geometry.
#[derive(Clone, Debug)]
pub struct BoundarySurface {
    surface: Arc<dyn Surface>,
    along: Option<VolumeId>,
    opposite: Option<VolumeId>,
}

impl BoundarySurface {
    /// Wrap `surface` with its attachments.
    pub fn new(
        surface: Arc<dyn Surface>,
        along: Option<VolumeId>,
        opposite: Option<VolumeId>,
    ) -> Self {
        Self {
            surface,
            along,
            opposite,
        }
    }

    /// The underlying surface.
    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// Volume on the normal side.
    pub fn along(&self) -> Option<VolumeId> {
        self.along
    }

    /// Volume on the side opposite the normal.
    pub fn opposite(&self) -> Option<VolumeId> {
        self.opposite
    }

    /// Volume entered when crossing at `position` with `momentum`,
    /// navigating in `direction`.
    pub fn attached_volume(
        &self,
        position: &Vector3,
        momentum: &Vector3,
        direction: NavigationDirection,
    ) -> Option<VolumeId> {
        let heading = direction.sign() * momentum;
        if self.surface.normal(position).dot(&heading) > 0.0 {
            self.along
        } else {
            self.opposite
        }
    }

    /// Whether `position` lies on this boundary.
    pub fn contains(&self, position: &Vector3) -> bool {
        self.surface.is_on_surface(
            position,
            BoundaryCheck::Tolerance {
                loc0: ON_BOUNDARY_TOLERANCE,
                loc1: ON_BOUNDARY_TOLERANCE,
            },
        )
    }
}

/// Result of [`TrackingGeometry::at_volume_boundary_with_next`](crate::TrackingGeometry::at_volume_boundary_with_next).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryCrossing {
    /// Whether the point lies on a boundary of the volume.
    pub at_boundary: bool,
    /// Volume attached on the far side; `None` when not at a boundary or
    /// when crossing out of the world.
    pub next_volume: Option<VolumeId>,
}
