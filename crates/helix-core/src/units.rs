//! Unit conventions.
//!
//! Lengths are millimetres, momenta GeV/c, magnetic fields tesla and
//! charges in units of the elementary charge.

/// Curvature constant: `κ = BFIELD_CONVERSION · q · B / p` in 1/mm for
/// `B` in tesla and `p` in GeV/c.
pub const BFIELD_CONVERSION: f64 = 0.299_792_458e-3;

/// Distance below which a point counts as lying on a surface (mm).
pub const ON_SURFACE_TOLERANCE: f64 = 1e-4;

/// Helix radius (mm) for a transverse momentum `pt` (GeV/c), field `b`
/// (tesla) and charge magnitude `q`.
pub fn helix_radius(pt: f64, b: f64, q: f64) -> f64 {
    pt / (BFIELD_CONVERSION * b * q.abs())
}
