//! Tracking volumes.

use helix_core::{math, Transform3, Vector3, VolumeId};
use smallvec::SmallVec;

use crate::boundary::BoundarySurface;
use crate::bounds::VolumeBounds;
use crate::layer::Layer;

/// A node of the volume tree.
#[derive(Clone, Debug)]
pub struct TrackingVolume {
    pub(crate) id: VolumeId,
    pub(crate) name: String,
    pub(crate) transform: Transform3,
    pub(crate) bounds: VolumeBounds,
    pub(crate) parent: Option<VolumeId>,
    pub(crate) children: SmallVec<[VolumeId; 4]>,
    pub(crate) detached: SmallVec<[VolumeId; 2]>,
    pub(crate) boundaries: Vec<BoundarySurface>,
    pub(crate) layers: Vec<Layer>,
}

impl TrackingVolume {
    /// Arena id.
    pub fn id(&self) -> VolumeId {
        self.id
    }

    /// Unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Global placement of the volume frame.
    pub fn transform(&self) -> &Transform3 {
        &self.transform
    }

    /// Shape in the local frame.
    pub fn bounds(&self) -> &VolumeBounds {
        &self.bounds
    }

    /// Enclosing volume; `None` for the world.
    pub fn parent(&self) -> Option<VolumeId> {
        self.parent
    }

    /// Confined (static) child volumes.
    pub fn children(&self) -> &[VolumeId] {
        &self.children
    }

    /// Confined detached volumes.
    pub fn detached_volumes(&self) -> &[VolumeId] {
        &self.detached
    }

    /// Whether this volume confines detached volumes.
    pub fn confines_detached(&self) -> bool {
        !self.detached.is_empty()
    }

    /// Outward-oriented boundary surfaces.
    pub fn boundaries(&self) -> &[BoundarySurface] {
        &self.boundaries
    }

    /// Confined layers.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Whether `position` (global) lies inside, grown by `tolerance`.
    pub fn inside(&self, position: &Vector3, tolerance: f64) -> bool {
        self.bounds
            .inside(&math::to_local(&self.transform, position), tolerance)
    }
}
