//! Boundary targeting and volume resolution over a tracking geometry.
//!
//! Before a step the navigator estimates the straight-line distance to
//! the nearest boundary ahead (the current volume's own boundaries and
//! those of the volumes it confines) and asserts it as the
//! [`GeometryBoundary`](helix_stepper::StepConstraint::GeometryBoundary)
//! bound. After the step it works out which volume the track is in.

use helix_core::{Vector3, VolumeId};
use helix_geometry::{BoundarySurface, TrackingGeometry, TrackingVolume};
use helix_stepper::{StepConstraint, StepperState};
use helix_surface::BoundaryCheck;
use smallvec::SmallVec;
use tracing::debug;

/// Boundaries closer than this are treated as already reached.
const BOUNDARY_TOLERANCE: f64 = 1e-4;

/// Probe distance past a crossed boundary used to pick the volume on the
/// far side.
const CROSSING_NUDGE: f64 = 1e-3;

/// Outcome of [`Navigator::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStatus {
    /// Still in the same volume (or navigating without geometry).
    Inside,
    /// Moved from one volume into another.
    Crossed {
        /// Volume left.
        from: VolumeId,
        /// Volume entered.
        to: VolumeId,
    },
    /// The track is outside the world.
    LeftWorld,
}

/// Per-run navigation state over an optional geometry.
#[derive(Debug)]
pub struct Navigator<'g> {
    geometry: Option<&'g TrackingGeometry>,
    current: Option<VolumeId>,
    target: Option<&'g BoundarySurface>,
}

impl<'g> Navigator<'g> {
    /// Navigator over `geometry`; without geometry it never constrains a
    /// step.
    pub fn new(geometry: Option<&'g TrackingGeometry>) -> Self {
        Self {
            geometry,
            current: None,
            target: None,
        }
    }

    /// Locate the start position. Returns `None` without geometry or when
    /// the start lies outside the world.
    pub fn initialize(&mut self, position: &Vector3) -> Option<VolumeId> {
        self.current = self
            .geometry
            .and_then(|g| g.lowest_tracking_volume(position))
            .map(TrackingVolume::id);
        self.target = None;
        self.current
    }

    /// Whether a geometry is attached.
    pub fn is_active(&self) -> bool {
        self.geometry.is_some()
    }

    /// The volume currently containing the track.
    pub fn current_volume(&self) -> Option<VolumeId> {
        self.current
    }

    /// Assert the distance to the nearest boundary ahead, or release the
    /// bound if none lies ahead. Returns the asserted distance.
    pub fn target_boundary(&mut self, state: &mut StepperState) -> Option<f64> {
        state.step_size_mut().release(StepConstraint::GeometryBoundary);
        self.target = None;
        let geometry = self.geometry?;
        let volume = geometry.volume(self.current?)?;

        let position = state.position();
        let heading = state.navigation_direction().sign() * state.direction();
        let check = BoundaryCheck::Tolerance {
            loc0: CROSSING_NUDGE,
            loc1: CROSSING_NUDGE,
        };

        let mut candidates: SmallVec<[&'g BoundarySurface; 16]> = SmallVec::new();
        candidates.extend(volume.boundaries());
        for id in volume.children().iter().chain(volume.detached_volumes()) {
            if let Some(inner) = geometry.volume(*id) {
                candidates.extend(inner.boundaries());
            }
        }

        let mut nearest: Option<(&'g BoundarySurface, f64)> = None;
        for boundary in candidates {
            let hit = boundary
                .surface()
                .intersection_estimate(&position, &heading, true, check);
            if !hit.valid || hit.path_length <= BOUNDARY_TOLERANCE {
                continue;
            }
            if nearest.is_none_or(|(_, best)| hit.path_length < best) {
                nearest = Some((boundary, hit.path_length));
            }
        }

        let (boundary, distance) = nearest?;
        state
            .step_size_mut()
            .update(StepConstraint::GeometryBoundary, distance);
        self.target = Some(boundary);
        Some(distance)
    }

    /// Resolve the volume after a step.
    pub fn update(&mut self, state: &StepperState) -> NavigationStatus {
        let (Some(geometry), Some(from)) = (self.geometry, self.current) else {
            return if self.is_active() {
                NavigationStatus::LeftWorld
            } else {
                NavigationStatus::Inside
            };
        };

        let position = state.position();
        let momentum = state.momentum();
        let nav = state.navigation_direction();
        let nudged = position + (nav.sign() * CROSSING_NUDGE) * state.direction();

        let crossing = match self.target.filter(|b| b.contains(&position)) {
            Some(boundary) => Some(boundary.attached_volume(&position, &momentum, nav)),
            None => geometry.volume(from).and_then(|volume| {
                let c = geometry.at_volume_boundary_with_next(&position, &momentum, volume, nav);
                c.at_boundary.then_some(c.next_volume)
            }),
        };

        let next = match crossing {
            Some(None) => None,
            Some(Some(attached)) => geometry
                .lowest_tracking_volume_from(attached, &nudged)
                .map(TrackingVolume::id),
            None => geometry
                .lowest_tracking_volume_from(from, &position)
                .map(TrackingVolume::id),
        };

        self.current = next;
        match next {
            None => {
                debug!(from = %from, "left the world");
                NavigationStatus::LeftWorld
            }
            Some(to) if to != from => {
                debug!(from = %from, to = %to, "volume transition");
                NavigationStatus::Crossed { from, to }
            }
            Some(_) => NavigationStatus::Inside,
        }
    }
}
