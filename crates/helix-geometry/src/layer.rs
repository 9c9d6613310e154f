//! Layers: sensitive or passive surfaces wrapped in a thin envelope.

use std::sync::Arc;

use helix_core::{math, LayerId, Transform3, Vector3};
use helix_surface::Surface;

use crate::bounds::VolumeBounds;

/// A surface confined by a volume, with an envelope used to associate
/// nearby points with it.
#[derive(Clone, Debug)]
pub struct Layer {
    id: LayerId,
    surface: Arc<dyn Surface>,
    envelope: VolumeBounds,
}

impl Layer {
    pub(crate) fn new(id: LayerId, surface: Arc<dyn Surface>, envelope: VolumeBounds) -> Self {
        Self {
            id,
            surface,
            envelope,
        }
    }

    /// Layer id, unique within the geometry.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The layer's representing surface.
    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// Envelope bounds in the surface's local frame.
    pub fn envelope(&self) -> &VolumeBounds {
        &self.envelope
    }

    /// Placement of the envelope (the surface placement).
    pub fn transform(&self) -> &Transform3 {
        self.surface.transform()
    }

    /// Whether `position` lies inside the envelope.
    pub fn contains(&self, position: &Vector3) -> bool {
        self.envelope
            .inside(&math::to_local(self.transform(), position), 0.0)
    }
}
