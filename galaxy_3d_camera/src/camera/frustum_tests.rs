use glam::{Mat4, Vec3};
use super::*;

fn gl_perspective() -> Mat4 {
    // 90° FOV, square, near 1, far 100, OpenGL clip depth [-1, 1]
    Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0)
}

// ============================================================================
// FrustumPlane
// ============================================================================

#[test]
fn test_plane_order_and_indices() {
    assert_eq!(
        FrustumPlane::ALL,
        [
            FrustumPlane::Top,
            FrustumPlane::Bottom,
            FrustumPlane::Left,
            FrustumPlane::Right,
            FrustumPlane::Near,
            FrustumPlane::Far,
        ]
    );
    for (i, plane) in FrustumPlane::ALL.iter().enumerate() {
        assert_eq!(plane.index(), i);
    }
}

// ============================================================================
// FrustumPlanes::from_view_projection
// ============================================================================

#[test]
fn test_new_planes_are_undefined() {
    let planes = FrustumPlanes::new();
    assert!(planes.is_undefined());
    assert_eq!(planes.matrix(), Mat4::IDENTITY);
}

#[test]
fn test_identity_matrix_gives_unit_clip_cube() {
    let planes = FrustumPlanes::from_view_projection(&Mat4::IDENTITY);
    assert!(!planes.is_undefined());

    for id in FrustumPlane::ALL {
        let normal_len = planes.plane(id).normal().length();
        assert!((normal_len - 1.0).abs() < 1e-6, "plane normal should be unit length");
        assert!((planes.distance_from_plane(id, Vec3::ZERO) - 1.0).abs() < 1e-6);
    }

    let near = planes.distance_from_plane(FrustumPlane::Near, Vec3::ZERO);
    let far = planes.distance_from_plane(FrustumPlane::Far, Vec3::ZERO);
    assert!((near + far - 2.0).abs() < 1e-6);
}

#[test]
fn test_identity_plane_orientation() {
    let planes = FrustumPlanes::from_view_projection(&Mat4::IDENTITY);

    assert_eq!(planes.plane(FrustumPlane::Left).normal(), Vec3::X);
    assert_eq!(planes.plane(FrustumPlane::Right).normal(), Vec3::NEG_X);
    assert_eq!(planes.plane(FrustumPlane::Bottom).normal(), Vec3::Y);
    assert_eq!(planes.plane(FrustumPlane::Top).normal(), Vec3::NEG_Y);
    assert_eq!(planes.plane(FrustumPlane::Near).normal(), Vec3::Z);
    assert_eq!(planes.plane(FrustumPlane::Far).normal(), Vec3::NEG_Z);
}

#[test]
fn test_perspective_near_and_far_planes() {
    let planes = FrustumPlanes::from_view_projection(&gl_perspective());

    // Near plane sits at z = -1, far plane at z = -100
    assert!(planes.distance_from_plane(FrustumPlane::Near, Vec3::new(0.0, 0.0, -1.0)).abs() < 1e-4);
    assert!(planes.distance_from_plane(FrustumPlane::Far, Vec3::new(0.0, 0.0, -100.0)).abs() < 1e-2);

    assert!((planes.distance_from_plane(FrustumPlane::Near, Vec3::new(0.0, 0.0, -50.0)) - 49.0).abs() < 1e-3);
    assert!(planes.distance_from_plane(FrustumPlane::Near, Vec3::new(0.0, 0.0, -0.5)) < 0.0);
    assert!(planes.distance_from_plane(FrustumPlane::Far, Vec3::new(0.0, 0.0, -150.0)) < 0.0);
}

#[test]
fn test_perspective_side_planes() {
    let planes = FrustumPlanes::from_view_projection(&gl_perspective());
    let inside = Vec3::new(0.0, 0.0, -10.0);

    for id in FrustumPlane::ALL {
        assert!(planes.distance_from_plane(id, inside) > 0.0, "{:?} should contain the view axis", id);
    }

    // 90° FOV: the side planes are the diagonals x = ±z, y = ±z
    assert!(planes.distance_from_plane(FrustumPlane::Left, Vec3::new(-10.0, 0.0, -5.0)) < 0.0);
    assert!(planes.distance_from_plane(FrustumPlane::Right, Vec3::new(10.0, 0.0, -5.0)) < 0.0);
    assert!(planes.distance_from_plane(FrustumPlane::Top, Vec3::new(0.0, 10.0, -5.0)) < 0.0);
    assert!(planes.distance_from_plane(FrustumPlane::Bottom, Vec3::new(0.0, -10.0, -5.0)) < 0.0);
    assert!(planes.distance_from_plane(FrustumPlane::Right, Vec3::new(5.0, 0.0, -5.0)).abs() < 1e-4);
}

#[test]
fn test_orthographic_planes() {
    let ortho = Mat4::orthographic_rh_gl(-10.0, 10.0, -5.0, 5.0, 0.1, 100.0);
    let planes = FrustumPlanes::from_view_projection(&ortho);

    assert!(planes.distance_from_plane(FrustumPlane::Right, Vec3::new(10.0, 0.0, -5.0)).abs() < 1e-4);
    assert!(planes.distance_from_plane(FrustumPlane::Top, Vec3::new(0.0, 5.0, -5.0)).abs() < 1e-4);
    assert!((planes.distance_from_plane(FrustumPlane::Left, Vec3::new(0.0, 0.0, -5.0)) - 10.0).abs() < 1e-4);
}

#[test]
fn test_view_translation_moves_planes() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
    let planes = FrustumPlanes::from_view_projection(&(gl_perspective() * view));

    // Near plane moved from z = -1 to z = 9
    assert!(planes.distance_from_plane(FrustumPlane::Near, Vec3::new(0.0, 0.0, 9.0)).abs() < 1e-3);
    assert!(planes.distance_from_plane(FrustumPlane::Near, Vec3::ZERO) > 0.0);
}

// ============================================================================
// Undefined frustum
// ============================================================================

#[test]
fn test_zero_matrix_is_undefined() {
    let planes = FrustumPlanes::from_view_projection(&Mat4::ZERO);
    assert!(planes.is_undefined());
}

#[test]
fn test_non_finite_matrix_is_undefined() {
    let mut m = Mat4::IDENTITY;
    m.w_axis.w = f32::NAN;
    let planes = FrustumPlanes::from_view_projection(&m);
    assert!(planes.is_undefined());
}

#[test]
fn test_failed_extraction_keeps_last_valid_planes() {
    let mut planes = FrustumPlanes::from_view_projection(&Mat4::IDENTITY);
    let before: Vec<Plane> = FrustumPlane::ALL.iter().map(|&id| *planes.plane(id)).collect();

    planes.set_planes(&Mat4::ZERO);
    assert!(planes.is_undefined());
    assert_eq!(planes.matrix(), Mat4::ZERO);
    for (i, id) in FrustumPlane::ALL.iter().enumerate() {
        assert_eq!(*planes.plane(*id), before[i]);
    }

    planes.set_planes(&gl_perspective());
    assert!(!planes.is_undefined());
}

#[test]
fn test_partial_degeneracy_does_not_commit_any_plane() {
    // Row 0 has no xyz part, so LEFT and RIGHT cannot be normalized
    let mut m = Mat4::IDENTITY;
    m.x_axis.x = 0.0;
    m.w_axis.x = 1.0;
    m.w_axis.w = 1.0;
    let mut planes = FrustumPlanes::from_view_projection(&Mat4::IDENTITY);
    let near_before = *planes.plane(FrustumPlane::Near);

    planes.set_planes(&m);

    assert!(planes.is_undefined());
    assert_eq!(*planes.plane(FrustumPlane::Near), near_before);
    assert_eq!(planes.plane(FrustumPlane::Left).normal(), Vec3::X);
}

// ============================================================================
// Frustum trait
// ============================================================================

#[test]
fn test_frustum_trait_object() {
    let planes = FrustumPlanes::from_view_projection(&Mat4::IDENTITY);
    let frustum: &dyn Frustum = &planes;

    assert!(!frustum.is_undefined());
    assert_eq!(
        frustum.distance_to_plane(FrustumPlane::Top, Vec3::new(0.0, 0.5, 0.0)),
        planes.distance_from_plane(FrustumPlane::Top, Vec3::new(0.0, 0.5, 0.0))
    );
}
