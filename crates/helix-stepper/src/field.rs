//! Magnetic field maps.
//!
//! Fields are in tesla, positions in millimetres.

use std::sync::Arc;

use helix_core::Vector3;

/// A static magnetic field, sampled by the Runge-Kutta stepper.
pub trait MagneticField: Send + Sync {
    /// Field vector at `position`.
    fn field(&self, position: &Vector3) -> Vector3;
}

/// The same field everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField(pub Vector3);

impl ConstantField {
    /// A solenoid-like field of `tesla` along the global z axis.
    pub fn along_z(tesla: f64) -> Self {
        Self(Vector3::new(0.0, 0.0, tesla))
    }
}

impl MagneticField for ConstantField {
    fn field(&self, _position: &Vector3) -> Vector3 {
        self.0
    }
}

/// No field at all.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullField;

impl MagneticField for NullField {
    fn field(&self, _position: &Vector3) -> Vector3 {
        Vector3::zeros()
    }
}

impl<F: MagneticField + ?Sized> MagneticField for Arc<F> {
    fn field(&self, position: &Vector3) -> Vector3 {
        (**self).field(position)
    }
}

impl<F: MagneticField + ?Sized> MagneticField for &F {
    fn field(&self, position: &Vector3) -> Vector3 {
        (**self).field(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_field_delegates() {
        let shared: Arc<dyn MagneticField> = Arc::new(ConstantField::along_z(2.0));
        assert_eq!(shared.field(&Vector3::x()), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(NullField.field(&Vector3::x()), Vector3::zeros());
    }
}
