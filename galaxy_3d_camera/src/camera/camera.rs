/// Camera — position and Euler angles composed lazily into a view matrix.
///
/// The view matrix is built through a small pipeline of cached stages:
///
/// ```text
/// translation  <- position
/// rotate_x     <- angle[X], a rotation about the Y axis (yaw)
/// rotate_y     <- angle[Y], a rotation about the X axis (pitch)
/// rotate_z     <- angle[Z], a rotation about the Z axis (roll)
/// rotate_yz    =  rotate_z * rotate_y
/// rotate_xyz   =  rotate_yz * rotate_x
/// view         =  rotate_xyz * translation
/// ```
///
/// Mutators mark the stage they touch and everything downstream of it as
/// stale. Stale stages are rebuilt top-down on the next read, so a change
/// to the roll angle never recomputes the translation or yaw matrices.
///
/// The cache uses interior mutability and is not synchronised: a Camera
/// is `Send` but not `Sync`.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use bitflags::bitflags;
use glam::{Mat4, Vec3};
use rustc_hash::FxHasher;
use crate::error::{Error, Result};
use super::frustum::{Frustum, FrustumPlane, FrustumPlanes};

const SOURCE: &str = "galaxy3d::Camera";

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

bitflags! {
    /// Stages of the view pipeline, in build order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Stages: u8 {
        const TRANSLATION = 1 << 0;
        const ROTATE_X = 1 << 1;
        const ROTATE_Y = 1 << 2;
        const ROTATE_Z = 1 << 3;
        const ROTATE_YZ = 1 << 4;
        const ROTATE_XYZ = 1 << 5;
        const VIEW = 1 << 6;
    }
}

impl Stages {
    const BUILD_ORDER: [Stages; 7] = [
        Stages::TRANSLATION,
        Stages::ROTATE_X,
        Stages::ROTATE_Y,
        Stages::ROTATE_Z,
        Stages::ROTATE_YZ,
        Stages::ROTATE_XYZ,
        Stages::VIEW,
    ];

    /// Every stage computed from one of `self`.
    fn dependents(self) -> Stages {
        let mut out = Stages::empty();
        if self.intersects(Stages::ROTATE_Y | Stages::ROTATE_Z) {
            out |= Stages::ROTATE_YZ;
        }
        if self.intersects(Stages::ROTATE_X | Stages::ROTATE_Y | Stages::ROTATE_Z | Stages::ROTATE_YZ) {
            out |= Stages::ROTATE_XYZ;
        }
        if !(self & !Stages::VIEW).is_empty() {
            out |= Stages::VIEW;
        }
        out
    }

    /// Stage rebuilt when the angle on `axis` changes.
    fn for_axis(axis: usize) -> Stages {
        match axis {
            X => Stages::ROTATE_X,
            Y => Stages::ROTATE_Y,
            _ => Stages::ROTATE_Z,
        }
    }
}

/// Cached intermediate matrices and their staleness.
#[derive(Debug, Clone)]
struct ViewPipeline {
    translation: Mat4,
    rotate_x: Mat4,
    rotate_y: Mat4,
    rotate_z: Mat4,
    rotate_yz: Mat4,
    rotate_xyz: Mat4,
    view: Mat4,
    stale: Stages,
    /// Set whenever the view changes; cleared by the view-projection cache.
    changed: bool,
    /// Total number of stages rebuilt since construction.
    rebuilds: u64,
}

impl ViewPipeline {
    fn new() -> Self {
        Self {
            translation: Mat4::IDENTITY,
            rotate_x: Mat4::IDENTITY,
            rotate_y: Mat4::IDENTITY,
            rotate_z: Mat4::IDENTITY,
            rotate_yz: Mat4::IDENTITY,
            rotate_xyz: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            stale: Stages::all(),
            changed: true,
            rebuilds: 0,
        }
    }

    fn invalidate(&mut self, stages: Stages) {
        self.stale |= stages | stages.dependents();
        self.changed = true;
    }

    /// Rebuild every stale stage and return the view matrix.
    fn view(&mut self, position: Vec3, angles: &[f32; 3]) -> Mat4 {
        if self.stale.is_empty() {
            return self.view;
        }

        let mut rebuilt = 0;
        for stage in Stages::BUILD_ORDER {
            if !self.stale.contains(stage) {
                continue;
            }
            self.build(stage, position, angles);
            self.stale.remove(stage);
            self.stale |= stage.dependents();
            rebuilt += 1;
        }

        self.rebuilds += rebuilt;
        self.changed = true;
        crate::camera_trace!(SOURCE, "Rebuilt {} view stage(s)", rebuilt);
        self.view
    }

    fn build(&mut self, stage: Stages, position: Vec3, angles: &[f32; 3]) {
        if stage == Stages::TRANSLATION {
            self.translation = Mat4::from_translation(-position);
        } else if stage == Stages::ROTATE_X {
            self.rotate_x = Mat4::from_rotation_y(angles[X]);
        } else if stage == Stages::ROTATE_Y {
            self.rotate_y = Mat4::from_rotation_x(angles[Y]);
        } else if stage == Stages::ROTATE_Z {
            self.rotate_z = Mat4::from_rotation_z(angles[Z]);
        } else if stage == Stages::ROTATE_YZ {
            self.rotate_yz = self.rotate_z * self.rotate_y;
        } else if stage == Stages::ROTATE_XYZ {
            self.rotate_xyz = self.rotate_yz * self.rotate_x;
        } else {
            self.view = self.rotate_xyz * self.translation;
        }
    }
}

/// Construction parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// World-space position
    pub position: Vec3,
    /// Euler angles in radians: x = yaw, y = pitch, z = roll
    pub rotation: Vec3,
    /// Point to look at; overrides yaw and pitch when set
    pub look_at: Option<Vec3>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            look_at: None,
        }
    }
}

/// First-person camera producing view and view-projection matrices.
///
/// Equality and hashing are defined on the computed view matrix, so two
/// cameras with different positions or angles compare equal when they
/// produce the same view transform.
///
/// As a [`Frustum`], a camera reports the planes of its last
/// [`Camera::view_projection_matrix`] call and is undefined before it.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    angles: [f32; 3],
    pipeline: RefCell<ViewPipeline>,
    planes: FrustumPlanes,
    view_projection: Mat4,
    projection_hash: Option<u64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera at the origin with no rotation, looking down -Z.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            angles: [0.0; 3],
            pipeline: RefCell::new(ViewPipeline::new()),
            planes: FrustumPlanes::new(),
            view_projection: Mat4::IDENTITY,
            projection_hash: None,
        }
    }

    /// Camera at `position` with no rotation.
    ///
    /// # Errors
    ///
    /// `NumericDomain` if a component of `position` is not finite.
    pub fn at(position: Vec3) -> Result<Self> {
        let mut camera = Self::new();
        camera.set_position(position)?;
        Ok(camera)
    }

    /// Camera at `position` turned toward `center`.
    pub fn looking_at(position: Vec3, center: Vec3) -> Result<Self> {
        let mut camera = Self::at(position)?;
        camera.look_at(center)?;
        Ok(camera)
    }

    /// Camera built from a [`CameraConfig`]. Every field is validated first.
    pub fn from_config(config: &CameraConfig) -> Result<Self> {
        check_vec(config.position, "camera position")?;
        check_vec(config.rotation, "camera rotation")?;
        if let Some(center) = config.look_at {
            check_vec(center, "look-at target")?;
        }

        let mut camera = Self::new();
        camera.position = config.position;
        camera.angles = config.rotation.to_array();
        if let Some(center) = config.look_at {
            camera.look_at(center)?;
        }
        Ok(camera)
    }

    // ===== GETTERS =====

    /// World-space position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw angle in radians (rotation about Y).
    pub fn rx(&self) -> f32 {
        self.angles[X]
    }

    /// Pitch angle in radians (rotation about X).
    pub fn ry(&self) -> f32 {
        self.angles[Y]
    }

    /// Roll angle in radians (rotation about Z).
    pub fn rz(&self) -> f32 {
        self.angles[Z]
    }

    /// All three angles, indexed X/Y/Z.
    pub fn rotation(&self) -> [f32; 3] {
        self.angles
    }

    /// Unit direction the camera looks toward, from yaw and pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_x, cos_x) = self.angles[X].sin_cos();
        let (sin_y, cos_y) = self.angles[Y].sin_cos();
        Vec3::new(sin_x * cos_y, -sin_y, -cos_x * cos_y)
    }

    /// Unit direction to the camera's right, in the horizontal plane.
    pub fn right(&self) -> Vec3 {
        let (sin_x, cos_x) = self.angles[X].sin_cos();
        Vec3::new(cos_x, 0.0, sin_x)
    }

    /// Number of pipeline stages rebuilt since construction.
    pub fn rebuild_count(&self) -> u64 {
        self.pipeline.borrow().rebuilds
    }

    /// Planes of the last view-projection matrix.
    pub fn planes(&self) -> &FrustumPlanes {
        &self.planes
    }

    // ===== ORIENTATION =====

    /// Turn the camera toward `center`, replacing yaw and pitch.
    ///
    /// # Errors
    ///
    /// `NumericDomain` if a component of `center` is not finite.
    pub fn look_at(&mut self, center: Vec3) -> Result<()> {
        check_vec(center, "look-at target")?;

        let d = self.position - center;
        self.angles[X] = -d.x.atan2(d.z);
        self.angles[Y] = d.y.atan2((d.x * d.x + d.z * d.z).sqrt());
        self.pipeline.get_mut().invalidate(Stages::ROTATE_X | Stages::ROTATE_Y);
        Ok(())
    }

    /// Add `v` radians to the yaw angle.
    pub fn inc_rx(&mut self, v: f32) -> Result<()> {
        self.inc_angle(X, v)
    }

    /// Add `v` radians to the pitch angle.
    pub fn inc_ry(&mut self, v: f32) -> Result<()> {
        self.inc_angle(Y, v)
    }

    /// Add `v` radians to the roll angle.
    pub fn inc_rz(&mut self, v: f32) -> Result<()> {
        self.inc_angle(Z, v)
    }

    /// Set the yaw angle in radians.
    pub fn set_rx(&mut self, v: f32) -> Result<()> {
        self.set_angle(X, v)
    }

    /// Set the pitch angle in radians.
    pub fn set_ry(&mut self, v: f32) -> Result<()> {
        self.set_angle(Y, v)
    }

    /// Set the roll angle in radians.
    pub fn set_rz(&mut self, v: f32) -> Result<()> {
        self.set_angle(Z, v)
    }

    fn inc_angle(&mut self, axis: usize, v: f32) -> Result<()> {
        check(v, "rotation increment")?;
        self.angles[axis] += v;
        self.pipeline.get_mut().invalidate(Stages::for_axis(axis));
        Ok(())
    }

    fn set_angle(&mut self, axis: usize, v: f32) -> Result<()> {
        check(v, "rotation value")?;
        self.angles[axis] = v;
        self.pipeline.get_mut().invalidate(Stages::for_axis(axis));
        Ok(())
    }

    // ===== MOVEMENT =====

    /// Move along [`Camera::forward`].
    ///
    /// # Errors
    ///
    /// `NumericDomain` if `distance` is not finite.
    pub fn step_forwards(&mut self, distance: f32) -> Result<()> {
        check(distance, "step distance")?;
        let delta = self.forward() * distance;
        self.translate(delta);
        Ok(())
    }

    /// Move along world +Y.
    pub fn step_upwards(&mut self, distance: f32) -> Result<()> {
        check(distance, "step distance")?;
        self.translate(Vec3::Y * distance);
        Ok(())
    }

    /// Move along [`Camera::right`].
    pub fn step_sideways(&mut self, distance: f32) -> Result<()> {
        check(distance, "step distance")?;
        let delta = self.right() * distance;
        self.translate(delta);
        Ok(())
    }

    fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.pipeline.get_mut().invalidate(Stages::TRANSLATION);
    }

    /// Replace the position.
    ///
    /// # Errors
    ///
    /// `NumericDomain` if a component of `position` is not finite.
    pub fn set_position(&mut self, position: Vec3) -> Result<()> {
        check_vec(position, "camera position")?;
        self.position = position;
        self.pipeline.get_mut().invalidate(Stages::TRANSLATION);
        Ok(())
    }

    /// Replace the leading position components with `values`.
    pub fn set_position_components(&mut self, values: &[f32]) -> Result<()> {
        self.set_position_slice(values, 0, values.len())
    }

    /// Replace position components from `values[offset..offset + len]`.
    ///
    /// At most three components are read; components past `len` keep
    /// their current value.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the range does not fit in `values`
    /// - `InvalidArgument` if `len` is zero
    /// - `NumericDomain` if a component read is not finite
    pub fn set_position_slice(&mut self, values: &[f32], offset: usize, len: usize) -> Result<()> {
        let end = match offset.checked_add(len) {
            Some(end) if end <= values.len() => end,
            _ => {
                crate::camera_error!(SOURCE, "Position slice {}+{} exceeds {} value(s)", offset, len, values.len());
                return Err(Error::OutOfRange { offset, len, available: values.len() });
            }
        };
        if len == 0 {
            crate::camera_error!(SOURCE, "Empty position slice");
            return Err(Error::InvalidArgument("position slice is empty".to_string()));
        }

        let mut position = self.position.to_array();
        for (dst, &src) in position.iter_mut().zip(&values[offset..end]) {
            *dst = check(src, "camera position")?;
        }
        self.position = Vec3::from_array(position);
        self.pipeline.get_mut().invalidate(Stages::TRANSLATION);
        Ok(())
    }

    // ===== MATRICES =====

    /// View matrix (world space to camera space), rebuilding stale stages first.
    ///
    /// Returns a copy; mutating it does not affect the camera.
    pub fn view_matrix(&self) -> Mat4 {
        self.pipeline.borrow_mut().view(self.position, &self.angles)
    }

    /// Combined `projection * view` matrix; also refreshes the camera planes.
    ///
    /// The product is cached and only recomputed when the view changed or
    /// `projection` hashes differently from the last one supplied.
    pub fn view_projection_matrix(&mut self, projection: &Mat4) -> Mat4 {
        let view = self.view_matrix();
        let hash = matrix_hash(projection);
        let pipeline = self.pipeline.get_mut();

        if pipeline.changed || self.projection_hash != Some(hash) {
            self.view_projection = *projection * view;
            self.planes.set_planes(&self.view_projection);
            self.projection_hash = Some(hash);
            pipeline.changed = false;
            crate::camera_trace!(SOURCE, "View-projection matrix refreshed");
        }

        self.view_projection
    }
}

impl Frustum for Camera {
    fn distance_to_plane(&self, plane: FrustumPlane, point: Vec3) -> f32 {
        self.planes.distance_from_plane(plane, point)
    }

    fn is_undefined(&self) -> bool {
        self.planes.is_undefined()
    }
}

impl PartialEq for Camera {
    fn eq(&self, other: &Self) -> bool {
        self.view_matrix() == other.view_matrix()
    }
}

// Positions and angles are checked finite on the way in
impl Eq for Camera {}

impl Hash for Camera {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in self.view_matrix().to_cols_array() {
            // -0.0 == 0.0, so both must hash alike
            state.write_u32(if v == 0.0 { 0 } else { v.to_bits() });
        }
    }
}

fn matrix_hash(m: &Mat4) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(bytemuck::bytes_of(m));
    hasher.finish()
}

fn check(value: f32, what: &str) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        crate::camera_error!(SOURCE, "Rejected {}: {}", what, value);
        Err(Error::NumericDomain(format!("{} is not finite: {}", what, value)))
    }
}

fn check_vec(value: Vec3, what: &str) -> Result<Vec3> {
    if value.is_finite() {
        Ok(value)
    } else {
        crate::camera_error!(SOURCE, "Rejected {}: {}", what, value);
        Err(Error::NumericDomain(format!("{} is not finite: {}", what, value)))
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
