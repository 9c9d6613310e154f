//! Point location through a small nested geometry.

use helix_core::math::translation;
use helix_core::{NavigationDirection, Vector3, VolumeId};
use helix_geometry::{GeometryBuilder, TrackingGeometry, VolumeBounds};
use proptest::prelude::*;

fn world_with_child() -> (TrackingGeometry, VolumeId) {
    let mut builder = GeometryBuilder::new(
        "world",
        translation(Vector3::zeros()),
        VolumeBounds::cuboid(50.0, 50.0, 50.0).unwrap(),
    );
    let child = builder
        .add_volume(
            VolumeId::WORLD,
            "C",
            translation(Vector3::new(5.0, 0.0, 0.0)),
            VolumeBounds::cuboid(5.0, 5.0, 5.0).unwrap(),
        )
        .unwrap();
    (builder.build().unwrap(), child)
}

#[test]
fn points_resolve_to_innermost_volume() {
    let (geometry, child) = world_with_child();
    let lookup = |x: f64| {
        geometry
            .lowest_tracking_volume(&Vector3::new(x, 0.0, 0.0))
            .map(|v| v.id())
    };
    assert_eq!(lookup(5.0), Some(child));
    assert_eq!(lookup(20.0), Some(VolumeId::WORLD));
    assert_eq!(lookup(80.0), None);
}

#[test]
fn geometry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrackingGeometry>();

    let (geometry, child) = world_with_child();
    let geometry = std::sync::Arc::new(geometry);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let g = std::sync::Arc::clone(&geometry);
            std::thread::spawn(move || {
                g.lowest_tracking_volume(&Vector3::new(1.0 + i as f64, 0.0, 0.0))
                    .map(|v| v.id())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(child));
    }
}

#[test]
fn crossing_the_child_face_switches_volume() {
    let (geometry, child) = world_with_child();
    let volume = geometry.volume(child).unwrap();
    let face = Vector3::new(10.0, -2.0, 3.0);
    let leaving = geometry.at_volume_boundary_with_next(
        &face,
        &Vector3::new(1.0, 0.2, 0.0),
        volume,
        NavigationDirection::Forward,
    );
    assert!(leaving.at_boundary);
    assert_eq!(leaving.next_volume, Some(VolumeId::WORLD));
    let backwards = geometry.at_volume_boundary_with_next(
        &face,
        &Vector3::new(1.0, 0.2, 0.0),
        volume,
        NavigationDirection::Backward,
    );
    assert_eq!(backwards.next_volume, Some(child));
}

proptest! {
    #[test]
    fn lookup_agrees_with_bounds(
        x in -60.0f64..60.0,
        y in -60.0f64..60.0,
        z in -60.0f64..60.0,
    ) {
        let (geometry, child) = world_with_child();
        let p = Vector3::new(x, y, z);
        let in_world = x.abs() <= 50.0 && y.abs() <= 50.0 && z.abs() <= 50.0;
        let in_child = (0.0..=10.0).contains(&x) && y.abs() <= 5.0 && z.abs() <= 5.0;
        let expected = if in_child {
            Some(child)
        } else if in_world {
            Some(VolumeId::WORLD)
        } else {
            None
        };
        prop_assert_eq!(geometry.lowest_tracking_volume(&p).map(|v| v.id()), expected);
    }
}
