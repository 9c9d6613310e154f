//! Ray/surface intersection record.

use helix_core::Vector3;

/// Result of [`Surface::intersection_estimate`](crate::Surface::intersection_estimate).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Estimated intersection point (the input position when invalid).
    pub position: Vector3,
    /// Signed path length along the ray to `position`.
    pub path_length: f64,
    /// Whether the estimate satisfies direction and bounds requirements.
    pub valid: bool,
}

impl Intersection {
    /// A valid or invalid intersection at `position`, `path_length` along the ray.
    pub fn new(position: Vector3, path_length: f64, valid: bool) -> Self {
        Self {
            position,
            path_length,
            valid,
        }
    }

    /// No solution: path length is the `f64::MAX` sentinel.
    pub fn invalid(position: Vector3) -> Self {
        Self {
            position,
            path_length: f64::MAX,
            valid: false,
        }
    }
}
