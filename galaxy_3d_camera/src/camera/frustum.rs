/// Frustum — six clipping planes for visibility culling.
///
/// Each plane satisfies `dot(normal, x) + d = 0` with a unit normal pointing
/// inward (toward the visible volume), so a point is inside the frustum if
/// its signed distance to every plane is non-negative.
///
/// Planes are extracted from a combined `projection * view` matrix with the
/// Gribb & Hartmann method. glam matrices are column-major with column
/// vectors, so the rows of the clip transform are read with `Mat4::row`
/// and no transpose is needed.

use glam::{Mat4, Vec3, Vec4};
use crate::error::Result;
use super::plane::Plane;

/// Frustum plane identifiers, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    Top,
    Bottom,
    Left,
    Right,
    Near,
    Far,
}

impl FrustumPlane {
    /// All six planes in classification order.
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Top,
        FrustumPlane::Bottom,
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];

    /// Slot of this plane in a six-plane array.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Anything that can report the signed distance from a point to each of
/// its six frustum planes.
///
/// Implemented by the frozen [`FrustumPlanes`] snapshot and by the live
/// [`Camera`](super::Camera). Bounds classification depends only on this.
pub trait Frustum {
    /// Signed distance from `point` to `plane`; positive means inside.
    fn distance_to_plane(&self, plane: FrustumPlane, point: Vec3) -> f32;

    /// Returns `true` if the planes cannot be trusted for classification.
    fn is_undefined(&self) -> bool {
        false
    }
}

/// Six frustum planes extracted from a view-projection matrix.
///
/// A freshly constructed set has no matrix yet and reports
/// `is_undefined() == true`.
#[derive(Debug, Clone)]
pub struct FrustumPlanes {
    planes: [Plane; 6],
    matrix: Mat4,
    undefined: bool,
}

impl Default for FrustumPlanes {
    fn default() -> Self {
        Self::new()
    }
}

impl FrustumPlanes {
    /// Create an undefined plane set (default planes, identity matrix).
    pub fn new() -> Self {
        Self {
            planes: [Plane::default(); 6],
            matrix: Mat4::IDENTITY,
            undefined: true,
        }
    }

    /// Extract the planes of a `projection * view` matrix.
    ///
    /// Check [`FrustumPlanes::is_undefined`] on the result: a degenerate
    /// matrix does not fail here.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let mut planes = Self::new();
        planes.set_planes(vp);
        planes
    }

    /// Recompute all six planes from `vp`.
    ///
    /// All six planes are derived before any is stored. If one of them is
    /// not finite the set is flagged undefined and keeps its previous
    /// planes; the failure is logged, not returned.
    pub fn set_planes(&mut self, vp: &Mat4) {
        self.matrix = *vp;

        match Self::extract(vp) {
            Ok(planes) => {
                self.planes = planes;
                self.undefined = false;
            }
            Err(err) => {
                crate::camera_debug!("galaxy3d::FrustumPlanes", "Undefined frustum calculated!");
                crate::camera_trace!("galaxy3d::FrustumPlanes", "{}", err);
                self.undefined = true;
            }
        }
    }

    fn extract(vp: &Mat4) -> Result<[Plane; 6]> {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut coefficients = [Vec4::ZERO; 6];
        coefficients[FrustumPlane::Near.index()] = rows[3] + rows[2];
        coefficients[FrustumPlane::Far.index()] = rows[3] - rows[2];
        coefficients[FrustumPlane::Bottom.index()] = rows[3] + rows[1];
        coefficients[FrustumPlane::Top.index()] = rows[3] - rows[1];
        coefficients[FrustumPlane::Left.index()] = rows[3] + rows[0];
        coefficients[FrustumPlane::Right.index()] = rows[3] - rows[0];

        let mut planes = [Plane::default(); 6];
        for (plane, c) in planes.iter_mut().zip(coefficients) {
            plane.set_from_coefficients(c.x, c.y, c.z, c.w)?;
        }
        Ok(planes)
    }

    /// Returns `true` if the last extraction failed, or none happened yet.
    pub fn is_undefined(&self) -> bool {
        self.undefined
    }

    /// Plane stored in the given slot.
    pub fn plane(&self, plane: FrustumPlane) -> &Plane {
        &self.planes[plane.index()]
    }

    /// Signed distance from `point` to `plane`.
    pub fn distance_from_plane(&self, plane: FrustumPlane, point: Vec3) -> f32 {
        self.planes[plane.index()].distance(point)
    }

    /// Copy of the last matrix passed to [`FrustumPlanes::set_planes`].
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}

impl Frustum for FrustumPlanes {
    fn distance_to_plane(&self, plane: FrustumPlane, point: Vec3) -> f32 {
        self.distance_from_plane(plane, point)
    }

    fn is_undefined(&self) -> bool {
        self.undefined
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
