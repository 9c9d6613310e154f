//! Volume shapes.

use helix_core::{math, Vector3};

use crate::error::GeometryError;

/// Shape of a tracking volume in its local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VolumeBounds {
    /// Axis-aligned box centred on the local origin.
    Cuboid {
        /// Half-length along local x.
        half_x: f64,
        /// Half-length along local y.
        half_y: f64,
        /// Half-length along local z.
        half_z: f64,
    },
    /// Hollow cylinder around the local z axis.
    Cylinder {
        /// Inner radius; zero for a solid cylinder.
        r_min: f64,
        /// Outer radius.
        r_max: f64,
        /// Half-length along local z.
        half_z: f64,
    },
}

fn positive(what: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidBounds {
            reason: format!("{what} must be positive and finite, got {value}"),
        })
    }
}

impl VolumeBounds {
    /// Box with the given half-lengths.
    pub fn cuboid(half_x: f64, half_y: f64, half_z: f64) -> Result<Self, GeometryError> {
        positive("half_x", half_x)?;
        positive("half_y", half_y)?;
        positive("half_z", half_z)?;
        Ok(Self::Cuboid {
            half_x,
            half_y,
            half_z,
        })
    }

    /// Cylinder shell `r_min <= r <= r_max`, `|z| <= half_z`.
    pub fn cylinder(r_min: f64, r_max: f64, half_z: f64) -> Result<Self, GeometryError> {
        if !(r_min.is_finite() && r_min >= 0.0) {
            return Err(GeometryError::InvalidBounds {
                reason: format!("r_min must be finite and non-negative, got {r_min}"),
            });
        }
        positive("r_max", r_max)?;
        positive("half_z", half_z)?;
        if r_min >= r_max {
            return Err(GeometryError::InvalidBounds {
                reason: format!("r_min {r_min} must be below r_max {r_max}"),
            });
        }
        Ok(Self::Cylinder {
            r_min,
            r_max,
            half_z,
        })
    }

    /// Whether the local point lies within the shape grown by `tolerance`.
    pub fn inside(&self, local: &Vector3, tolerance: f64) -> bool {
        match *self {
            Self::Cuboid {
                half_x,
                half_y,
                half_z,
            } => {
                local.x.abs() <= half_x + tolerance
                    && local.y.abs() <= half_y + tolerance
                    && local.z.abs() <= half_z + tolerance
            }
            Self::Cylinder {
                r_min,
                r_max,
                half_z,
            } => {
                let r = math::perp(local);
                r >= r_min - tolerance && r <= r_max + tolerance && local.z.abs() <= half_z + tolerance
            }
        }
    }
}
