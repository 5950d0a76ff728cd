/// Bounds — classify bounding volumes against a frustum.
///
/// Every strategy walks the frustum planes in [`FrustumPlane::ALL`] order
/// and compares the signed distance of the volume center against the
/// radius paired with that plane:
///
/// - `distance < -radius`: the volume is fully behind the plane, the
///   result is [`Containment::Outside`] and the walk stops
/// - `distance < radius`: the volume straddles the plane, the result
///   becomes [`Containment::Intersect`] and the walk continues
///
/// A volume no plane rejects or cuts is [`Containment::Inside`].

use glam::Vec3;
use crate::error::{Error, Result};
use super::frustum::{Frustum, FrustumPlane};

const SOURCE: &str = "galaxy3d::Bounds";

const SIDE_PLANES: [FrustumPlane; 4] = [
    FrustumPlane::Top,
    FrustumPlane::Bottom,
    FrustumPlane::Left,
    FrustumPlane::Right,
];

/// Result of a bounds classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    /// Fully visible
    Inside,
    /// Fully invisible, safe to cull
    Outside,
    /// Straddles a plane, cannot be culled
    Intersect,
}

impl Containment {
    /// Returns `true` unless the volume can be culled.
    pub fn is_visible(&self) -> bool {
        *self != Containment::Outside
    }
}

/// Bounding volume shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bounds {
    /// One radius, tested against all six planes.
    Sphere,
    /// One radius, side planes only.
    ///
    /// Returns as soon as a plane cuts the circle, so a later plane that
    /// would reject it is never reached and `Intersect` is reported where
    /// [`Bounds::Sphere`] would report `Outside`.
    Circle,
    /// X and Y radii: X against LEFT/RIGHT, Y against TOP/BOTTOM.
    Ellipse,
    /// X, Y and Z radii: Z against NEAR/FAR.
    Ellipsoid,
}

impl Bounds {
    /// Number of radius components [`Bounds::classify`] reads.
    pub fn radius_components(&self) -> usize {
        match self {
            Bounds::Sphere | Bounds::Circle => 1,
            Bounds::Ellipse => 2,
            Bounds::Ellipsoid => 3,
        }
    }

    /// Classify the volume at `center` against `frustum`.
    ///
    /// `radius` holds at least [`Bounds::radius_components`] values; extra
    /// values are ignored. Radii are expected to be non-negative.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the frustum is undefined or `radius` is too short
    /// - `NumericDomain` if a used radius or the center is not finite
    pub fn classify<F>(&self, frustum: &F, center: Vec3, radius: &[f32]) -> Result<Containment>
    where
        F: Frustum + ?Sized,
    {
        let radius = self.validate(frustum, center, radius)?;

        let mut result = Containment::Inside;
        for &plane in self.planes() {
            let r = self.radius_for(plane, radius);
            let distance = frustum.distance_to_plane(plane, center);

            if distance < -r {
                return Ok(Containment::Outside);
            } else if distance < r {
                if *self == Bounds::Circle {
                    return Ok(Containment::Intersect);
                }
                result = Containment::Intersect;
            }
        }

        Ok(result)
    }

    fn validate<'a, F>(&self, frustum: &F, center: Vec3, radius: &'a [f32]) -> Result<&'a [f32]>
    where
        F: Frustum + ?Sized,
    {
        if frustum.is_undefined() {
            crate::camera_error!(SOURCE, "{:?} classified against an undefined frustum", self);
            return Err(Error::InvalidArgument("frustum is undefined".to_string()));
        }

        let needed = self.radius_components();
        if radius.len() < needed {
            crate::camera_error!(SOURCE, "{:?} needs {} radius value(s), got {}", self, needed, radius.len());
            return Err(Error::InvalidArgument(format!(
                "insufficient radius data: {:?} needs {} value(s), got {}",
                self, needed, radius.len()
            )));
        }

        let radius = &radius[..needed];
        if let Some(r) = radius.iter().find(|r| !r.is_finite()) {
            crate::camera_error!(SOURCE, "Non-finite radius: {}", r);
            return Err(Error::NumericDomain(format!("non-finite radius: {}", r)));
        }
        if !center.is_finite() {
            crate::camera_error!(SOURCE, "Non-finite center: {}", center);
            return Err(Error::NumericDomain(format!("non-finite center: {}", center)));
        }

        Ok(radius)
    }

    fn planes(&self) -> &'static [FrustumPlane] {
        match self {
            Bounds::Sphere | Bounds::Ellipsoid => &FrustumPlane::ALL,
            Bounds::Circle | Bounds::Ellipse => &SIDE_PLANES,
        }
    }

    fn radius_for(&self, plane: FrustumPlane, radius: &[f32]) -> f32 {
        match (self, plane) {
            (Bounds::Sphere | Bounds::Circle, _) => radius[0],
            (_, FrustumPlane::Left | FrustumPlane::Right) => radius[0],
            (_, FrustumPlane::Top | FrustumPlane::Bottom) => radius[1],
            (_, FrustumPlane::Near | FrustumPlane::Far) => radius[2],
        }
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
