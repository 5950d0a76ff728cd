//! Integration tests for the camera culling pipeline
//!
//! Camera -> view-projection matrix -> frustum planes -> bounds classification,
//! through the public `galaxy3d` namespace only.
//!
//! Run with: cargo test --test culling_integration_tests

use galaxy_3d_camera::galaxy3d::camera::{
    Bounds, Camera, CameraConfig, Containment, Frustum, FrustumPlanes,
};
use galaxy_3d_camera::galaxy3d::Error;
use galaxy_3d_camera::glam::{Mat4, Vec3};

fn projection() -> Mat4 {
    Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0)
}

/// Camera ten units up +Z, looking back at the origin, with planes computed.
fn camera_on_z_axis() -> Camera {
    let mut camera = Camera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO).unwrap();
    camera.view_projection_matrix(&projection());
    camera
}

// ============================================================================
// CULLING TESTS
// ============================================================================

#[test]
fn test_integration_sphere_culling_from_camera() {
    let camera = camera_on_z_axis();

    let cases = [
        (Vec3::ZERO, 1.0, Containment::Inside),
        (Vec3::ZERO, 8.0, Containment::Intersect),
        (Vec3::new(0.0, 0.0, 20.0), 1.0, Containment::Outside),
        (Vec3::new(50.0, 0.0, 0.0), 1.0, Containment::Outside),
        (Vec3::new(0.0, -50.0, 0.0), 1.0, Containment::Outside),
        (Vec3::new(0.0, 0.0, -95.0), 1.0, Containment::Outside),
    ];
    for (center, radius, expected) in cases {
        let result = Bounds::Sphere.classify(&camera, center, &[radius]).unwrap();
        assert_eq!(result, expected, "sphere at {} radius {}", center, radius);
    }
}

#[test]
fn test_integration_snapshot_matches_live_camera() {
    let mut camera = camera_on_z_axis();
    let vp = camera.view_projection_matrix(&projection());
    let snapshot = FrustumPlanes::from_view_projection(&vp);

    for center in [Vec3::ZERO, Vec3::new(7.0, 0.0, 0.0), Vec3::new(3.0, 3.0, -40.0)] {
        for bounds in [Bounds::Sphere, Bounds::Ellipsoid] {
            let radius = [1.5, 1.5, 1.5];
            assert_eq!(
                bounds.classify(&camera, center, &radius).unwrap(),
                bounds.classify(&snapshot, center, &radius).unwrap()
            );
        }
    }
}

#[test]
fn test_integration_snapshot_is_frozen() {
    let mut camera = camera_on_z_axis();
    let snapshot = camera.planes().clone();

    // Turn around: the origin is now behind the camera
    camera.set_rx(std::f32::consts::PI).unwrap();
    camera.view_projection_matrix(&projection());

    assert_eq!(
        Bounds::Sphere.classify(&snapshot, Vec3::ZERO, &[1.0]).unwrap(),
        Containment::Inside
    );
    assert_eq!(
        Bounds::Sphere.classify(&camera, Vec3::ZERO, &[1.0]).unwrap(),
        Containment::Outside
    );
}

#[test]
fn test_integration_camera_planes_lag_until_recomputed() {
    let mut camera = camera_on_z_axis();
    camera.step_sideways(100.0).unwrap();

    // Planes still describe the last view-projection
    assert_eq!(
        Bounds::Sphere.classify(&camera, Vec3::ZERO, &[1.0]).unwrap(),
        Containment::Inside
    );

    camera.view_projection_matrix(&projection());
    assert_eq!(
        Bounds::Sphere.classify(&camera, Vec3::ZERO, &[1.0]).unwrap(),
        Containment::Outside
    );
}

#[test]
fn test_integration_camera_from_config() {
    let config = CameraConfig {
        position: Vec3::new(0.0, 5.0, 10.0),
        look_at: Some(Vec3::ZERO),
        ..CameraConfig::default()
    };
    let mut camera = Camera::from_config(&config).unwrap();
    camera.view_projection_matrix(&projection());

    assert_eq!(
        Bounds::Ellipsoid.classify(&camera, Vec3::ZERO, &[1.0, 0.5, 1.0]).unwrap(),
        Containment::Inside
    );
}

#[test]
fn test_integration_camera_without_projection_cannot_classify() {
    let camera = Camera::new();
    assert!(camera.is_undefined());

    let result = Bounds::Circle.classify(&camera, Vec3::ZERO, &[1.0]);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_integration_cameras_usable_as_hash_keys() {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    seen.insert(Camera::at(Vec3::ONE).unwrap());
    seen.insert(Camera::at(Vec3::ONE).unwrap());
    seen.insert(Camera::at(Vec3::ZERO).unwrap());

    assert_eq!(seen.len(), 2);
}
