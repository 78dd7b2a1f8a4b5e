//! 4D vector for homogeneous coordinates.

use super::vec3::Vec3;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Lift a Vec3 into homogeneous space with the given w component.
    pub const fn from_vec3(v: Vec3, w: f64) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Convert to Vec3, discarding w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divide x, y, z by w.
    ///
    /// Fails with [`Error::DegenerateHomogeneous`] when `w == 0`, where the
    /// point lies at infinity and has no finite Cartesian image.
    pub fn perspective_divide(self) -> Result<Vec3> {
        if self.w == 0.0 {
            return Err(Error::DegenerateHomogeneous);
        }
        Ok(Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w))
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v.x, v.y, v.z)
    }
}
