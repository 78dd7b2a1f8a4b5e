//! Linear algebra: fixed-size vectors and matrices for the render path, plus a
//! dynamically sized [`matrix::Matrix`] for shape-generic arithmetic.

pub mod mat4;
pub mod matrix;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use matrix::{dot, Matrix};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
