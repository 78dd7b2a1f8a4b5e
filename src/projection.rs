//! Perspective projection parameters.
//!
//! [`Projection`] keeps the parameters a projection matrix is built from, so
//! the same values can also drive the screen-space depth remap
//! ([`DepthRange`]).

use crate::math::mat4::Mat4;
use crate::transform::projection_matrix;

/// Perspective projection parameters.
///
/// The camera looks down −Z, so both clipping planes are negative z values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    fov_y: f64,
    /// Aspect ratio (width / height).
    aspect_ratio: f64,
    /// Near clipping plane (negative z).
    z_near: f64,
    /// Far clipping plane (negative z, beyond `z_near`).
    z_far: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(45.0, 1.0, -0.1, -50.0)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in degrees
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane (must be < 0)
    /// * `z_far` - Far clipping plane (must be < z_near)
    pub fn new(fov_y: f64, aspect_ratio: f64, z_near: f64, z_far: f64) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f64 {
        self.z_near
    }

    pub fn z_far(&self) -> f64 {
        self.z_far
    }

    pub fn matrix(&self) -> Mat4 {
        projection_matrix(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Depth remap that spans this projection's own near/far distances.
    pub fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.z_near.abs(), self.z_far.abs())
    }
}

/// Maps NDC depth `[-1, 1]` to stored depth `[near, far]` via
/// `z' = z · f1 + f2`.
///
/// The default keeps the fixed `0.1 .. 100` range regardless of the active
/// projection. Use [`Projection::depth_range`] to follow the real planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub near: f64,
    pub far: f64,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::new(0.1, 100.0)
    }
}

impl DepthRange {
    pub const fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    pub fn f1(&self) -> f64 {
        (self.far - self.near) / 2.0
    }

    pub fn f2(&self) -> f64 {
        (self.far + self.near) / 2.0
    }

    #[inline]
    pub fn remap(&self, ndc_z: f64) -> f64 {
        ndc_z * self.f1() + self.f2()
    }
}
