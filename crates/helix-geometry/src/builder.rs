//! Minimal arena builder for tracking geometries.
//!
//! Volumes are placed globally and attached to a parent by id. At
//! [`build`](GeometryBuilder::build) every volume receives outward-oriented
//! boundary surfaces: along the normal lies the parent (nothing for the
//! world), against it the volume itself.

use std::sync::Arc;

use helix_core::math::{self, placement};
use helix_core::{LayerId, Transform3, Vector3, VolumeId};
use helix_surface::{CylinderSurface, DiscSurface, LineSurface, PlaneSurface, Surface};
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::boundary::BoundarySurface;
use crate::bounds::VolumeBounds;
use crate::error::GeometryError;
use crate::geometry::TrackingGeometry;
use crate::layer::Layer;
use crate::volume::TrackingVolume;

struct PendingVolume {
    name: String,
    transform: Transform3,
    bounds: VolumeBounds,
    parent: Option<VolumeId>,
    children: SmallVec<[VolumeId; 4]>,
    detached: SmallVec<[VolumeId; 2]>,
    layers: Vec<Layer>,
}

/// Assembles a [`TrackingGeometry`].
pub struct GeometryBuilder {
    volumes: Vec<PendingVolume>,
    names: IndexMap<String, VolumeId>,
    next_layer: u32,
    beam_tube: Option<Arc<dyn Surface>>,
}

impl GeometryBuilder {
    /// Start with the world volume, which gets [`VolumeId::WORLD`].
    pub fn new(name: impl Into<String>, transform: Transform3, bounds: VolumeBounds) -> Self {
        let name = name.into();
        let mut names = IndexMap::new();
        names.insert(name.clone(), VolumeId::WORLD);
        Self {
            volumes: vec![PendingVolume {
                name,
                transform,
                bounds,
                parent: None,
                children: SmallVec::new(),
                detached: SmallVec::new(),
                layers: Vec::new(),
            }],
            names,
            next_layer: 0,
            beam_tube: None,
        }
    }

    /// Add a static volume confined by `parent`.
    pub fn add_volume(
        &mut self,
        parent: VolumeId,
        name: impl Into<String>,
        transform: Transform3,
        bounds: VolumeBounds,
    ) -> Result<VolumeId, GeometryError> {
        let id = self.push(parent, name.into(), transform, bounds)?;
        self.volumes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Add a detached volume confined by `parent`.
    ///
    /// Detached volumes may overlap static structure; static lookups stop
    /// at their host.
    pub fn add_detached_volume(
        &mut self,
        parent: VolumeId,
        name: impl Into<String>,
        transform: Transform3,
        bounds: VolumeBounds,
    ) -> Result<VolumeId, GeometryError> {
        let id = self.push(parent, name.into(), transform, bounds)?;
        self.volumes[parent.index()].detached.push(id);
        Ok(id)
    }

    /// Add a layer to `volume`; `envelope` is expressed in the surface's
    /// local frame.
    pub fn add_layer(
        &mut self,
        volume: VolumeId,
        surface: Arc<dyn Surface>,
        envelope: VolumeBounds,
    ) -> Result<LayerId, GeometryError> {
        let pending = self
            .volumes
            .get_mut(volume.index())
            .ok_or(GeometryError::UnknownVolume { id: volume })?;
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        pending.layers.push(Layer::new(id, surface, envelope));
        Ok(id)
    }

    /// Replace the default beam-line surface (a perigee at the origin).
    pub fn set_beam_tube(&mut self, surface: Arc<dyn Surface>) {
        self.beam_tube = Some(surface);
    }

    /// Generate boundaries and freeze the geometry.
    pub fn build(self) -> Result<TrackingGeometry, GeometryError> {
        let mut volumes = Vec::with_capacity(self.volumes.len());
        for (index, pending) in self.volumes.into_iter().enumerate() {
            let id = VolumeId(index as u32);
            let boundaries = boundary_surfaces(id, pending.parent, &pending.transform, &pending.bounds)?;
            volumes.push(TrackingVolume {
                id,
                name: pending.name,
                transform: pending.transform,
                bounds: pending.bounds,
                parent: pending.parent,
                children: pending.children,
                detached: pending.detached,
                boundaries,
                layers: pending.layers,
            });
        }
        debug!(volumes = volumes.len(), "tracking geometry built");
        let beam_tube = self
            .beam_tube
            .unwrap_or_else(|| Arc::new(LineSurface::perigee(Vector3::zeros())));
        Ok(TrackingGeometry::new(volumes, self.names, beam_tube))
    }

    fn push(
        &mut self,
        parent: VolumeId,
        name: String,
        transform: Transform3,
        bounds: VolumeBounds,
    ) -> Result<VolumeId, GeometryError> {
        let host = self
            .volumes
            .get(parent.index())
            .ok_or(GeometryError::UnknownVolume { id: parent })?;
        if self.names.contains_key(&name) {
            return Err(GeometryError::DuplicateName { name });
        }
        let centre = transform.translation.vector;
        if !host
            .bounds
            .inside(&math::to_local(&host.transform, &centre), 0.0)
        {
            return Err(GeometryError::NotConfined {
                name,
                parent: host.name.clone(),
            });
        }
        let id = VolumeId(self.volumes.len() as u32);
        self.names.insert(name.clone(), id);
        self.volumes.push(PendingVolume {
            name,
            transform,
            bounds,
            parent: Some(parent),
            children: SmallVec::new(),
            detached: SmallVec::new(),
            layers: Vec::new(),
        });
        Ok(id)
    }
}

// ── Boundary generation ────────────────────────────────────────────

fn boundary_surfaces(
    id: VolumeId,
    parent: Option<VolumeId>,
    transform: &Transform3,
    bounds: &VolumeBounds,
) -> Result<Vec<BoundarySurface>, GeometryError> {
    let axis = |v: Vector3| math::rotate_to_global(transform, &v);
    let at = |v: Vector3| math::to_global(transform, &v);
    let outward = |surface: Arc<dyn Surface>| BoundarySurface::new(surface, parent, Some(id));

    match *bounds {
        VolumeBounds::Cuboid {
            half_x,
            half_y,
            half_z,
        } => {
            let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());
            // (face centre, local x, local y, normal, half extents)
            let faces = [
                (half_x * x, y, z, x, half_y, half_z),
                (-half_x * x, z, y, -x, half_z, half_y),
                (half_y * y, z, x, y, half_z, half_x),
                (-half_y * y, x, z, -y, half_x, half_z),
                (half_z * z, x, y, z, half_x, half_y),
                (-half_z * z, y, x, -z, half_y, half_x),
            ];
            faces
                .into_iter()
                .map(|(centre, u, v, n, hu, hv)| -> Result<BoundarySurface, GeometryError> {
                    let frame = placement(at(centre), axis(u), axis(v), axis(n));
                    let plane: Arc<dyn Surface> = Arc::new(PlaneSurface::rectangle(frame, hu, hv)?);
                    Ok(outward(plane))
                })
                .collect()
        }
        VolumeBounds::Cylinder {
            r_min,
            r_max,
            half_z,
        } => {
            let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());
            let mut surfaces = Vec::with_capacity(4);
            let outer: Arc<dyn Surface> = Arc::new(CylinderSurface::new(*transform, r_max, half_z)?);
            surfaces.push(outward(outer));
            if r_min > 0.0 {
                // The inner cylinder's normal points into the volume.
                let inner: Arc<dyn Surface> = Arc::new(CylinderSurface::new(*transform, r_min, half_z)?);
                surfaces.push(BoundarySurface::new(inner, Some(id), parent));
            }
            let plus = placement(at(half_z * z), axis(x), axis(y), axis(z));
            let plus: Arc<dyn Surface> = Arc::new(DiscSurface::new(plus, r_min, r_max)?);
            surfaces.push(outward(plus));
            let minus = placement(at(-half_z * z), axis(y), axis(x), axis(-z));
            let minus: Arc<dyn Surface> = Arc::new(DiscSurface::new(minus, r_min, r_max)?);
            surfaces.push(outward(minus));
            Ok(surfaces)
        }
    }
}
