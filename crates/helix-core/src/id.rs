//! Strongly-typed identifiers for geometry objects.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a tracking volume within a geometry arena.
///
/// `VolumeId(n)` is the n-th volume registered with the geometry builder;
/// the world volume is always `VolumeId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeId(pub u32);

impl VolumeId {
    /// Identifier of the root (world) volume.
    pub const WORLD: VolumeId = VolumeId(0);

    /// Arena index of this volume.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VolumeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a layer within its owning volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LayerId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a detector element in an externally-owned table.
///
/// Surfaces hold this as a non-owning association; the table's lifetime
/// is entirely the caller's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetectorElementId(pub u32);

impl fmt::Display for DetectorElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DetectorElementId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`SurfaceId`] allocation.
static SURFACE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a surface.
///
/// Allocated from a monotonic atomic counter via [`SurfaceId::next`].
/// Two distinct surface instances always have different IDs, even if they
/// are geometrically identical. Cloning a surface preserves its ID, which
/// is correct because surfaces are immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocate a fresh, unique surface ID. Thread-safe.
    pub fn next() -> Self {
        Self(SURFACE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for diagnostics.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_ids_are_unique() {
        let a = SurfaceId::next();
        let b = SurfaceId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn world_is_index_zero() {
        assert_eq!(VolumeId::WORLD.index(), 0);
        assert_eq!(VolumeId::from(3).to_string(), "3");
    }
}
