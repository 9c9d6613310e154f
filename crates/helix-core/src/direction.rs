//! Navigation direction along the track.

use std::fmt;
use std::ops::Neg;

/// Whether path length increases (`Forward`) or decreases (`Backward`)
/// with stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavigationDirection {
    /// Step along the momentum.
    #[default]
    Forward,
    /// Step against the momentum.
    Backward,
}

impl NavigationDirection {
    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Direction whose sign matches `value` (zero counts as forward).
    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

impl Neg for NavigationDirection {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl fmt::Display for NavigationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}
