//! Geometry construction errors.

use std::error::Error;
use std::fmt;

use helix_core::VolumeId;
use helix_surface::SurfaceError;

/// Errors from [`GeometryBuilder`](crate::GeometryBuilder).
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A referenced volume does not exist.
    UnknownVolume {
        /// The unknown id.
        id: VolumeId,
    },
    /// Two volumes share a name.
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// Volume bounds are degenerate.
    InvalidBounds {
        /// What is wrong.
        reason: String,
    },
    /// A child volume's centre lies outside its parent.
    NotConfined {
        /// Name of the child volume.
        name: String,
        /// Name of the parent volume.
        parent: String,
    },
    /// A generated boundary surface could not be constructed.
    Surface(SurfaceError),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVolume { id } => write!(f, "unknown volume {id}"),
            Self::DuplicateName { name } => write!(f, "duplicate volume name '{name}'"),
            Self::InvalidBounds { reason } => write!(f, "invalid volume bounds: {reason}"),
            Self::NotConfined { name, parent } => {
                write!(f, "volume '{name}' is not inside its parent '{parent}'")
            }
            Self::Surface(e) => write!(f, "boundary surface: {e}"),
        }
    }
}

impl Error for GeometryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SurfaceError> for GeometryError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}
