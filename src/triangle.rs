use crate::colors::Color;
use crate::math::{Vec2, Vec3, Vec4};

/// One triangle with per-vertex attributes.
///
/// The positions are in whatever space the pipeline stage works in: object
/// space straight out of the mesh loader, screen space (pixels, remapped
/// depth) once the rasterizer has projected it. A triangle is built per face
/// per draw call and dropped once it has been scan-converted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    /// Vertex positions v0, v1, v2 (counter-clockwise for front faces).
    pub v: [Vec3; 3],
    /// RGB color per vertex, 0-255.
    pub color: [Color; 3],
    pub tex_coords: [Vec2; 3],
    pub normal: [Vec3; 3],
}

impl Triangle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn a(&self) -> Vec3 {
        self.v[0]
    }

    pub fn b(&self) -> Vec3 {
        self.v[1]
    }

    pub fn c(&self) -> Vec3 {
        self.v[2]
    }

    // Setters index the fixed three-vertex arrays; `ind` must be 0, 1 or 2.

    pub fn set_vertex(&mut self, ind: usize, ver: Vec3) {
        self.v[ind] = ver;
    }

    pub fn set_normal(&mut self, ind: usize, n: Vec3) {
        self.normal[ind] = n;
    }

    pub fn set_color(&mut self, ind: usize, r: f64, g: f64, b: f64) {
        self.color[ind] = Color::new(r, g, b);
    }

    pub fn set_tex_coord(&mut self, ind: usize, s: f64, t: f64) {
        self.tex_coords[ind] = Vec2::new(s, t);
    }

    /// The three positions as homogeneous points (w = 1).
    pub fn to_vector4(&self) -> [Vec4; 3] {
        self.v.map(Vec4::from)
    }
}
