//! Vector and frame aliases over `nalgebra`, plus the handful of
//! placement helpers every surface and volume needs.

use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion};

/// A 2D local position on a surface.
pub type Vector2 = nalgebra::Vector2<f64>;

/// A 3D global position, direction, or momentum.
pub type Vector3 = nalgebra::Vector3<f64>;

/// A 3x3 rotation (measurement frame) matrix.
pub type RotationMatrix3 = Matrix3<f64>;

/// Rigid placement of a surface or volume in the global frame.
pub type Transform3 = Isometry3<f64>;

/// Apply a placement to a local point.
pub fn to_global(transform: &Transform3, local: &Vector3) -> Vector3 {
    transform.transform_point(&Point3::from(*local)).coords
}

/// Express a global point in a placement's local frame.
pub fn to_local(transform: &Transform3, global: &Vector3) -> Vector3 {
    transform.inverse_transform_point(&Point3::from(*global)).coords
}

/// Rotate a local direction into the global frame (no translation).
pub fn rotate_to_global(transform: &Transform3, local: &Vector3) -> Vector3 {
    transform.transform_vector(local)
}

/// Rotate a global direction into a placement's local frame.
pub fn rotate_to_local(transform: &Transform3, global: &Vector3) -> Vector3 {
    transform.inverse_transform_vector(global)
}

/// Transverse magnitude `sqrt(x² + y²)`.
pub fn perp(v: &Vector3) -> f64 {
    v.x.hypot(v.y)
}

/// Azimuthal angle of a vector.
pub fn phi(v: &Vector3) -> f64 {
    v.y.atan2(v.x)
}

/// Polar angle of a vector, in `[0, π]`.
pub fn theta(v: &Vector3) -> f64 {
    perp(v).atan2(v.z)
}

/// Unit direction from polar and azimuthal angles.
pub fn direction_from_angles(phi: f64, theta: f64) -> Vector3 {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Vector3::new(sin_t * cos_p, sin_t * sin_p, cos_t)
}

/// Placement from a translation and three right-handed orthonormal axes
/// (the columns of the local-to-global rotation).
///
/// The axes are not re-orthonormalized; callers pass exact unit vectors.
pub fn placement(center: Vector3, x: Vector3, y: Vector3, z: Vector3) -> Transform3 {
    let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
    Isometry3::from_parts(
        Translation3::from(center),
        UnitQuaternion::from_rotation_matrix(&rotation),
    )
}

/// Pure translation.
pub fn translation(center: Vector3) -> Transform3 {
    Isometry3::translation(center.x, center.y, center.z)
}

/// Global direction of a placement's local z axis.
pub fn local_z_axis(transform: &Transform3) -> Vector3 {
    transform.rotation * Vector3::z()
}

/// Any unit vector perpendicular to `v` (which must be nonzero).
pub fn any_perpendicular(v: &Vector3) -> Vector3 {
    let helper = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    v.cross(&helper).normalize()
}
