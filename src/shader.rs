//! Fragment shading hook.
//!
//! The fill rasterizer interpolates every vertex attribute at each covered
//! pixel and asks a [`FragmentShader`] for the final color. Lighting models
//! are out of scope; the two shaders here pass the vertex color through or
//! visualise normals.

use crate::colors::Color;
use crate::math::{Vec2, Vec3};

/// Attributes of one fragment, interpolated with barycentric weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentPayload {
    /// Screen-space position: pixel centre x, y and interpolated depth.
    pub position: Vec3,
    pub color: Color,
    pub normal: Vec3,
    pub tex_coords: Vec2,
}

pub trait FragmentShader {
    fn shade(&self, fragment: &FragmentPayload) -> Color;
}

/// Passes the interpolated vertex color through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexColorShader;

impl FragmentShader for VertexColorShader {
    #[inline]
    fn shade(&self, fragment: &FragmentPayload) -> Color {
        fragment.color
    }
}

/// Maps the interpolated normal from `[-1, 1]` to `[0, 255]` per channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalShader;

impl FragmentShader for NormalShader {
    #[inline]
    fn shade(&self, fragment: &FragmentPayload) -> Color {
        (fragment.normal + Vec3::ONE) * (0.5 * 255.0)
    }
}
