//! Benchmark profiles for the Helix propagation engine.
//!
//! - [`reference_detector`]: five nested cylindrical volumes with barrel
//!   layers, roughly the size of a collider tracker
//! - [`reference_propagator`]: Runge-Kutta propagation in a 2 T solenoid
//!   field over the reference detector
//! - [`random_tracks`]: seeded track fan from the interaction region

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use helix_core::math::{direction_from_angles, translation};
use helix_core::{CurvilinearParameters, Vector3, VolumeId};
use helix_engine::{Propagator, PropagatorOptions};
use helix_geometry::{GeometryBuilder, GeometryError, TrackingGeometry, VolumeBounds};
use helix_stepper::{ConstantField, RungeKuttaStepper};
use helix_surface::CylinderSurface;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `(name, r_max, half_z, layer radii)` of the volumes inside the world,
/// outermost first.
const VOLUMES: [(&str, f64, f64, &[f64]); 4] = [
    ("calorimeter", 2000.0, 3000.0, &[]),
    ("strips", 1100.0, 2800.0, &[400.0, 550.0, 700.0, 850.0, 1000.0]),
    ("short-strips", 350.0, 1200.0, &[220.0, 280.0]),
    ("pixel", 180.0, 600.0, &[33.0, 70.0, 115.0, 160.0]),
];

/// Five nested cylinders around the beam axis with cylindrical layers.
pub fn reference_detector() -> Result<TrackingGeometry, GeometryError> {
    let origin = translation(Vector3::zeros());
    let mut builder = GeometryBuilder::new(
        "world",
        origin,
        VolumeBounds::cylinder(0.0, 5000.0, 6000.0)?,
    );
    let mut parent = VolumeId::WORLD;
    for (name, r_max, half_z, layers) in VOLUMES {
        parent = builder.add_volume(parent, name, origin, VolumeBounds::cylinder(0.0, r_max, half_z)?)?;
        for &radius in layers {
            let surface = CylinderSurface::new(origin, radius, half_z - 1.0)?;
            let envelope = VolumeBounds::cylinder(radius - 2.0, radius + 2.0, half_z - 1.0)?;
            builder.add_layer(parent, Arc::new(surface), envelope)?;
        }
    }
    builder.build()
}

/// Runge-Kutta propagator in a uniform 2 T field over
/// [`reference_detector`].
pub fn reference_propagator(
) -> Result<Propagator<RungeKuttaStepper<ConstantField>>, Box<dyn std::error::Error>> {
    let stepper = RungeKuttaStepper::with_defaults(ConstantField::along_z(2.0));
    let opts = PropagatorOptions {
        max_steps: 10_000,
        ..Default::default()
    };
    Ok(Propagator::new(stepper, opts)?.with_geometry(Arc::new(reference_detector()?)))
}

/// `n` tracks from a 1 mm luminous region with |η| < 2.5 and
/// 0.5 <= p < 10 GeV/c, alternating in charge.
pub fn random_tracks(n: usize, seed: u64) -> Vec<CurvilinearParameters> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let vertex = Vector3::new(
                rng.random_range(-0.01..0.01),
                rng.random_range(-0.01..0.01),
                rng.random_range(-1.0..1.0),
            );
            let eta: f64 = rng.random_range(-2.5..2.5);
            let theta = 2.0 * (-eta).exp().atan();
            let phi = rng.random_range(-std::f64::consts::PI..std::f64::consts::PI);
            let p: f64 = rng.random_range(0.5..10.0);
            let charge = if i % 2 == 0 { 1.0 } else { -1.0 };
            CurvilinearParameters::new(vertex, p * direction_from_angles(phi, theta), charge)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_core::TrackParameters;

    #[test]
    fn reference_detector_builds() {
        let geometry = reference_detector().unwrap();
        assert_eq!(geometry.len(), 5);
        let pixel = geometry.lowest_tracking_volume(&Vector3::new(50.0, 0.0, 0.0)).unwrap();
        assert_eq!(pixel.name(), "pixel");
        assert_eq!(pixel.layers().len(), 4);
    }

    #[test]
    fn reference_propagator_builds() {
        assert!(reference_propagator().is_ok());
    }

    #[test]
    fn random_tracks_are_seeded() {
        let a = random_tracks(16, 7);
        assert_eq!(a, random_tracks(16, 7));
        assert_ne!(a, random_tracks(16, 8));
        for t in &a {
            assert!(t.absolute_momentum() >= 0.5 - 1e-9);
            assert!(t.position().z.abs() <= 1.0);
        }
    }
}
