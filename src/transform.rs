//! Model, view and projection matrix builders.
//!
//! Conventions: right-handed world, camera looking down −Z, so the near and
//! far planes are passed as **negative** z values. Angles are in degrees.

use crate::math::{Mat4, Vec3};

/// Rotation of the model about the Z axis through the origin.
pub fn model_matrix(angle_degrees: f64) -> Mat4 {
    Mat4::rotation_z(angle_degrees.to_radians())
}

/// Moves the world so that `eye` ends up at the origin.
///
/// The camera keeps the default orientation; only its position is applied.
pub fn view_matrix(eye: Vec3) -> Mat4 {
    Mat4::translation(-eye.x, -eye.y, -eye.z)
}

/// Perspective projection of the frustum onto the canonical cube `[-1, 1]³`.
///
/// Built as `S · T · P`:
/// - `P` squashes the frustum into the box between the near and far planes
///   (perspective to orthographic),
/// - `T` moves the box centre to the origin,
/// - `S` scales the box to the cube.
///
/// A point on the near plane lands on NDC z = −1 and one on the far plane on
/// z = +1, so smaller depth means closer to the camera.
pub fn projection_matrix(fov_y_degrees: f64, aspect_ratio: f64, z_near: f64, z_far: f64) -> Mat4 {
    let (n, f) = (z_near, z_far);

    let persp_to_ortho = Mat4::new([
        [n, 0.0, 0.0, 0.0],
        [0.0, n, 0.0, 0.0],
        [0.0, 0.0, n + f, -n * f],
        [0.0, 0.0, 1.0, 0.0],
    ]);

    // Near plane is at negative z, so its distance is -n
    let top = -n * (fov_y_degrees / 2.0).to_radians().tan();
    let right = top * aspect_ratio;
    let (left, bottom) = (-right, -top);

    let translate = Mat4::translation(
        -(right + left) / 2.0,
        -(top + bottom) / 2.0,
        -(n + f) / 2.0,
    );
    let scale = Mat4::scaling(
        2.0 / (right - left),
        2.0 / (top - bottom),
        2.0 / (f - n),
    );

    scale * translate * persp_to_ortho
}

/// The three transforms a draw call goes through. All default to identity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transform {
    /// Model-view-projection: `projection · view · model`.
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}
