//! Boundary-check policy for on-surface and intersection queries.

/// How strictly a local position is tested against a surface's bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BoundaryCheck {
    /// Bounds are ignored.
    Disabled,
    /// Bounds are tested exactly.
    #[default]
    Strict,
    /// Bounds are widened by an absolute tolerance per local coordinate.
    Tolerance {
        /// Tolerance on the first local coordinate.
        loc0: f64,
        /// Tolerance on the second local coordinate.
        loc1: f64,
    },
}

impl BoundaryCheck {
    /// Whether bounds are tested at all.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Tolerances on `(loc0, loc1)`; zero for strict and disabled checks.
    pub fn tolerances(self) -> (f64, f64) {
        match self {
            Self::Tolerance { loc0, loc1 } => (loc0.abs(), loc1.abs()),
            Self::Disabled | Self::Strict => (0.0, 0.0),
        }
    }
}

impl From<bool> for BoundaryCheck {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Strict
        } else {
            Self::Disabled
        }
    }
}
