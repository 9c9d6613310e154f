//! Bounds shapes in a surface's local frame.

use helix_core::Vector2;

use crate::boundary::BoundaryCheck;
use crate::error::SurfaceError;

/// The region of a surface's local frame that belongs to the surface.
///
/// Each variant interprets the local coordinates of the surface type it
/// belongs to; see the per-variant docs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceBounds {
    /// Infinite surface; every local position is inside.
    Unbounded,
    /// Planar rectangle centred on the origin, local `(x, y)`.
    Rectangle {
        /// Half-extent along local x.
        half_x: f64,
        /// Half-extent along local y.
        half_y: f64,
    },
    /// Disc annulus, local `(r, φ)`.
    Radial {
        /// Inner radius.
        r_min: f64,
        /// Outer radius.
        r_max: f64,
    },
    /// Cylinder of fixed radius, local `(rφ, z)`; only `z` is bounded.
    Cylinder {
        /// Cylinder radius.
        radius: f64,
        /// Half-length along the axis.
        half_z: f64,
    },
    /// Straw tube, local `(signed r, z)`.
    Line {
        /// Straw radius.
        radius: f64,
        /// Half-length along the wire.
        half_z: f64,
    },
}

fn require(ok: bool, reason: impl FnOnce() -> String) -> Result<(), SurfaceError> {
    if ok {
        Ok(())
    } else {
        Err(SurfaceError::InvalidBounds { reason: reason() })
    }
}

fn positive(name: &str, value: f64) -> Result<(), SurfaceError> {
    require(value.is_finite() && value > 0.0, || {
        format!("{name} must be finite and positive, got {value}")
    })
}

impl SurfaceBounds {
    /// Rectangle with the given half-extents.
    pub fn rectangle(half_x: f64, half_y: f64) -> Result<Self, SurfaceError> {
        positive("half_x", half_x)?;
        positive("half_y", half_y)?;
        Ok(Self::Rectangle { half_x, half_y })
    }

    /// Annulus `r_min <= r <= r_max`; `r_min` may be zero.
    pub fn radial(r_min: f64, r_max: f64) -> Result<Self, SurfaceError> {
        require(r_min.is_finite() && r_min >= 0.0, || {
            format!("r_min must be finite and non-negative, got {r_min}")
        })?;
        positive("r_max", r_max)?;
        require(r_min < r_max, || format!("r_min {r_min} must be below r_max {r_max}"))?;
        Ok(Self::Radial { r_min, r_max })
    }

    /// Cylinder with the given radius and half-length.
    pub fn cylinder(radius: f64, half_z: f64) -> Result<Self, SurfaceError> {
        positive("radius", radius)?;
        positive("half_z", half_z)?;
        Ok(Self::Cylinder { radius, half_z })
    }

    /// Straw with the given radius and half-length.
    pub fn line(radius: f64, half_z: f64) -> Result<Self, SurfaceError> {
        positive("radius", radius)?;
        positive("half_z", half_z)?;
        Ok(Self::Line { radius, half_z })
    }

    /// Whether `local` lies inside the bounds under `check`.
    ///
    /// A disabled check always succeeds.
    pub fn inside(&self, local: &Vector2, check: BoundaryCheck) -> bool {
        if !check.is_enabled() {
            return true;
        }
        let (tol0, tol1) = check.tolerances();
        match *self {
            Self::Unbounded => true,
            Self::Rectangle { half_x, half_y } => {
                local.x.abs() <= half_x + tol0 && local.y.abs() <= half_y + tol1
            }
            Self::Radial { r_min, r_max } => local.x >= r_min - tol0 && local.x <= r_max + tol0,
            Self::Cylinder { half_z, .. } => local.y.abs() <= half_z + tol1,
            Self::Line { radius, half_z } => {
                local.x.abs() <= radius + tol0 && local.y.abs() <= half_z + tol1
            }
        }
    }

    /// Whether these bounds restrict anything.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Self::Unbounded)
    }
}
