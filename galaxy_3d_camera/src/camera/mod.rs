//! Camera module — view matrices, frustum planes and bounds culling.
//!
//! A [`Camera`] turns a position and three Euler angles into a view matrix
//! through a lazily rebuilt pipeline. Combined with a projection matrix it
//! yields [`FrustumPlanes`], against which [`Bounds`] classify volumes as
//! inside, outside or intersecting.

mod bounds;
mod camera;
mod frustum;
mod plane;

pub use bounds::{Bounds, Containment};
pub use camera::{Camera, CameraConfig};
pub use frustum::{Frustum, FrustumPlane, FrustumPlanes};
pub use plane::{Plane, MEDIUMP};
