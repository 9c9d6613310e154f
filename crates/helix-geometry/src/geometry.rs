//! The tracking geometry and its navigation queries.

use std::sync::Arc;

use helix_core::{NavigationDirection, Vector3, VolumeId};
use helix_surface::Surface;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::boundary::BoundaryCrossing;
use crate::layer::Layer;
use crate::volume::TrackingVolume;

/// Tolerance used when collecting detached volumes around a point.
pub const DETACHED_TOLERANCE: f64 = 0.001;

/// Read-only volume tree with a single world root.
#[derive(Debug)]
pub struct TrackingGeometry {
    volumes: Vec<TrackingVolume>,
    names: IndexMap<String, VolumeId>,
    beam_tube: Arc<dyn Surface>,
}

impl TrackingGeometry {
    pub(crate) fn new(
        volumes: Vec<TrackingVolume>,
        names: IndexMap<String, VolumeId>,
        beam_tube: Arc<dyn Surface>,
    ) -> Self {
        Self {
            volumes,
            names,
            beam_tube,
        }
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// The world volume.
    pub fn highest_tracking_volume(&self) -> &TrackingVolume {
        // The builder always creates the world first.
        &self.volumes[VolumeId::WORLD.index()]
    }

    /// Volume by id.
    pub fn volume(&self, id: VolumeId) -> Option<&TrackingVolume> {
        self.volumes.get(id.index())
    }

    /// Volume by name.
    pub fn tracking_volume(&self, name: &str) -> Option<&TrackingVolume> {
        self.names.get(name).and_then(|&id| self.volume(id))
    }

    /// All volumes in arena order (the world first).
    pub fn volumes(&self) -> impl Iterator<Item = &TrackingVolume> {
        self.volumes.iter()
    }

    /// Number of volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Always false: a geometry has at least the world.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// The beam-line surface.
    pub fn beam_tube(&self) -> &Arc<dyn Surface> {
        &self.beam_tube
    }

    // ── Point location ─────────────────────────────────────────────

    /// Innermost volume containing `position`, or `None` outside the
    /// world.
    pub fn lowest_tracking_volume(&self, position: &Vector3) -> Option<&TrackingVolume> {
        let world = self.highest_tracking_volume();
        if !world.inside(position, 0.0) {
            return None;
        }
        Some(self.descend(world, position, true))
    }

    /// Like [`lowest_tracking_volume`](Self::lowest_tracking_volume) but
    /// starting the search from `start`: the search climbs from `start`
    /// until a volume contains `position`, then descends.
    pub fn lowest_tracking_volume_from(
        &self,
        start: VolumeId,
        position: &Vector3,
    ) -> Option<&TrackingVolume> {
        let mut current = self.volume(start)?;
        while !current.inside(position, 0.0) {
            current = self.volume(current.parent?)?;
        }
        Some(self.descend(current, position, true))
    }

    /// Innermost static volume containing `position`; the descent stops at
    /// the first volume that confines detached volumes.
    pub fn lowest_static_tracking_volume(&self, position: &Vector3) -> Option<&TrackingVolume> {
        let world = self.highest_tracking_volume();
        if !world.inside(position, 0.0) {
            return None;
        }
        Some(self.descend(world, position, false))
    }

    /// Detached volumes confined by the lowest static volume that contain
    /// `position` within [`DETACHED_TOLERANCE`].
    pub fn lowest_detached_tracking_volumes(
        &self,
        position: &Vector3,
    ) -> SmallVec<[&TrackingVolume; 2]> {
        let Some(host) = self.lowest_static_tracking_volume(position) else {
            return SmallVec::new();
        };
        host.detached
            .iter()
            .filter_map(|&id| self.volume(id))
            .filter(|v| v.inside(position, DETACHED_TOLERANCE))
            .collect()
    }

    fn descend<'a>(
        &'a self,
        mut current: &'a TrackingVolume,
        position: &Vector3,
        through_detached: bool,
    ) -> &'a TrackingVolume {
        loop {
            if current.confines_detached() && !through_detached {
                return current;
            }
            let next = current
                .children
                .iter()
                .chain(current.detached.iter().filter(|_| through_detached))
                .filter_map(|&id| self.volume(id))
                .find(|v| v.inside(position, 0.0));
            match next {
                Some(v) => current = v,
                None => return current,
            }
        }
    }

    // ── Boundaries and layers ──────────────────────────────────────

    /// Whether `position` lies on any boundary of `volume`.
    pub fn at_volume_boundary(&self, position: &Vector3, volume: &TrackingVolume) -> bool {
        volume.boundaries.iter().any(|b| b.contains(position))
    }

    /// Whether `position` lies on a boundary of `volume` and, if so, the
    /// volume attached on the far side for the given heading. The first
    /// matching boundary wins.
    pub fn at_volume_boundary_with_next(
        &self,
        position: &Vector3,
        momentum: &Vector3,
        volume: &TrackingVolume,
        direction: NavigationDirection,
    ) -> BoundaryCrossing {
        match volume.boundaries.iter().find(|b| b.contains(position)) {
            Some(b) => BoundaryCrossing {
                at_boundary: true,
                next_volume: b.attached_volume(position, momentum, direction),
            },
            None => BoundaryCrossing {
                at_boundary: false,
                next_volume: None,
            },
        }
    }

    /// Layer of the innermost volume whose envelope contains `position`.
    pub fn associated_layer(&self, position: &Vector3) -> Option<&Layer> {
        self.lowest_tracking_volume(position)?
            .layers
            .iter()
            .find(|l| l.contains(position))
    }
}
