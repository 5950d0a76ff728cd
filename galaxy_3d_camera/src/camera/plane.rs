/// Plane — a half-space bounded by `dot(normal, x) + d = 0`.
///
/// The normal points toward the positive side. Planes are mutated in place
/// by their owning `FrustumPlanes` whenever it recomputes.

use glam::Vec3;
use crate::error::{Error, Result};

/// Tolerance used when comparing plane offsets.
pub const MEDIUMP: f32 = 1e-4;

/// A plane defined by a normal, a representative point and an offset.
///
/// Equality compares `d` within [`MEDIUMP`] but `normal` and `point`
/// exactly. Planes built from coefficients never set `point`, so two such
/// planes compare equal whenever their normals match bit-for-bit.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    d: f32,
}

impl Default for Plane {
    /// Plane through the origin facing +Y.
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            point: Vec3::ZERO,
            d: 0.0,
        }
    }
}

impl Plane {
    /// Plane through three points, see [`Plane::set_from_points`].
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let mut plane = Self::default();
        plane.set_from_points(a, b, c);
        plane
    }

    /// Plane from a normal and a point on it, see [`Plane::set_normal_and_point`].
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let mut plane = Self::default();
        plane.set_normal_and_point(normal, point);
        plane
    }

    /// Plane from raw `(a, b, c, d)` coefficients, see [`Plane::set_from_coefficients`].
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Result<Self> {
        let mut plane = Self::default();
        plane.set_from_coefficients(a, b, c, d)?;
        Ok(plane)
    }

    // ===== GETTERS =====

    /// Unit normal (positive side).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Representative point on the plane.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Offset term of the plane equation.
    pub fn d(&self) -> f32 {
        self.d
    }

    // ===== SETTERS =====

    /// Set the plane passing through `a`, `b` and `c`.
    ///
    /// The normal is `normalize((a - b) x (c - b))` and `b` becomes the
    /// representative point. Collinear points yield a NaN normal; the
    /// resulting plane is rejected later by finiteness checks.
    pub fn set_from_points(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let ab = a - b;
        let cb = c - b;
        self.normal = ab.cross(cb).normalize();
        self.point = b;
        self.d = -self.normal.dot(self.point);
    }

    /// Set the plane from a normal and a point. The normal is stored as given.
    pub fn set_normal_and_point(&mut self, normal: Vec3, point: Vec3) {
        self.normal = normal;
        self.point = point;
        self.d = -self.normal.dot(self.point);
    }

    /// Set the plane from the coefficients of `ax + by + cz + d = 0`.
    ///
    /// `(a, b, c)` is normalized and `d` rescaled by the same length so the
    /// equation still describes the same plane. Nothing is written on error.
    ///
    /// # Errors
    ///
    /// `NumericDomain` if a coefficient is not finite or `(a, b, c)` cannot
    /// be normalized.
    pub fn set_from_coefficients(&mut self, a: f32, b: f32, c: f32, d: f32) -> Result<()> {
        if !(a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite()) {
            return Err(Error::NumericDomain(format!(
                "invalid plane coefficient in ({}, {}, {}, {})",
                a, b, c, d
            )));
        }

        let coefficients = Vec3::new(a, b, c);
        let length = coefficients.length();
        let normal = coefficients / length;
        let offset = d / length;

        if !(normal.is_finite() && offset.is_finite()) {
            return Err(Error::NumericDomain(format!(
                "plane normal ({}, {}, {}) cannot be normalized",
                a, b, c
            )));
        }

        self.normal = normal;
        self.d = offset;
        Ok(())
    }

    /// Signed distance from `p`; positive on the side the normal points to.
    pub fn distance(&self, p: Vec3) -> f32 {
        self.d + p.dot(self.normal)
    }

    /// Returns `true` if the normal and offset are finite.
    pub fn is_finite(&self) -> bool {
        self.normal.is_finite() && self.d.is_finite()
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        (self.d - other.d).abs() <= MEDIUMP
            && self.normal == other.normal
            && self.point == other.point
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
