//! 4x4 transformation matrix.
//!
//! # Convention
//! - Stored row-major as `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```
//! use rastrum::math::{mat4::Mat4, vec4::Vec4};
//!
//! let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::scaling(2.0, 2.0, 2.0);
//! let p = m * Vec4::point(1.0, 1.0, 1.0);
//! assert_eq!(p, Vec4::point(3.0, 4.0, 5.0));
//! ```

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::vec3::Vec3;
use super::vec4::Vec4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Z axis, angle in radians.
    pub fn rotation_z(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation by `angle_degrees` around an arbitrary axis through the origin.
    ///
    /// Rodrigues' rotation formula with `a` the normalized axis:
    ///
    /// ```text
    /// R = I·cosθ + (a·aᵀ)·(1 − cosθ) + [a]ₓ·sinθ
    /// ```
    ///
    /// where `[a]ₓ` is the skew-symmetric cross-product matrix of `a`. The 3x3
    /// result is embedded with an identity fourth row and column.
    pub fn rotation_about_axis(axis: Vec3, angle_degrees: f64) -> Self {
        let theta = angle_degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let a = axis.normalize().to_array();

        let cross = [
            [0.0, -a[2], a[1]],
            [a[2], 0.0, -a[0]],
            [-a[1], a[0], 0.0],
        ];

        let mut m = Mat4::identity();
        for row in 0..3 {
            for col in 0..3 {
                let identity = if row == col { 1.0 } else { 0.0 };
                m.data[row][col] = identity * cos
                    + a[row] * a[col] * (1.0 - cos)
                    + cross[row][col] * sin;
            }
        }
        m
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    #[inline]
    pub fn row(&self, row: usize) -> Vec4 {
        let [x, y, z, w] = self.data[row];
        Vec4::new(x, y, z, w)
    }

    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.data
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, value) in out.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::new([
            [1.0, 1.0, 2.0, 3.0],
            [1.0, 1.0, 2.0, 3.0],
            [11.0, -1.0, 2.0, 3.0],
            [1.0, 1.0, 2.0, 3.0],
        ]);
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn rodrigues_matches_reference_values() {
        let r = Mat4::rotation_about_axis(Vec3::new(1.0, 1.0, 1.0), 45.0);
        let expected = Mat4::new([
            [0.804737854124365, -0.31061721752604554, 0.5058793634016805, 0.0],
            [0.5058793634016805, 0.804737854124365, -0.31061721752604554, 0.0],
            [-0.31061721752604554, 0.5058793634016805, 0.804737854124365, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_relative_eq!(r, expected, epsilon = 1e-9);
        assert_relative_eq!(r.get(0, 0), 0.804737854124365, epsilon = 1e-9);
    }

    #[test]
    fn rodrigues_about_z_matches_rotation_z() {
        let axis = Mat4::rotation_about_axis(Vec3::new(0.0, 0.0, 2.0), 30.0);
        assert_relative_eq!(axis, Mat4::rotation_z(30f64.to_radians()), epsilon = 1e-12);
    }

    #[test]
    fn rotation_is_orthonormal() {
        let r = Mat4::rotation_about_axis(Vec3::new(0.3, -1.0, 2.0), 73.0);
        let mut transposed = Mat4::identity();
        for row in 0..4 {
            for col in 0..4 {
                transposed.set(col, row, r.get(row, col));
            }
        }
        assert_relative_eq!(r * transposed, Mat4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(
            t * Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0)
        );
    }
}
