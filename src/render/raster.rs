//! Triangle scan conversion.
//!
//! Two strategies share the [`TriangleRasterizer`] trait and can be swapped
//! at runtime through [`RenderMode`]:
//! - [`FillRasterizer`]: bounding box iteration with an edge-function inside
//!   test, barycentric interpolation and a z-buffer
//! - [`WireframeRasterizer`]: the three edges as Bresenham lines, no depth
//!
//! Triangles arrive in screen space: x and y in pixels (y up), z already
//! remapped to stored depth.
//!
//! # Edge function
//!
//! For an edge A → B and a point P, the z component of the cross product
//! `(B − A) × (P − A)` is
//!
//! ```text
//! E(P) = (B.x − A.x)·(P.y − A.y) − (B.y − A.y)·(P.x − A.x)
//! ```
//!
//! P is inside when the three edges AB, BC, CA all give the same sign, which
//! accepts either winding order. Zero counts for both signs, so points on an
//! edge are inside.

use super::framebuffer::FrameBuffer;
use super::line::draw_line;
use crate::colors;
use crate::math::Vec3;
use crate::shader::{FragmentPayload, FragmentShader};
use crate::triangle::Triangle;

#[inline]
fn edge_function(a: Vec3, b: Vec3, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Twice the signed area of the triangle; positive for counter-clockwise.
#[inline]
fn double_area(v: &[Vec3; 3]) -> f64 {
    edge_function(v[0], v[1], v[2].x, v[2].y)
}

/// Whether `(px, py)` lies inside the triangle's 2D projection, edges
/// included.
pub fn inside_triangle(px: f64, py: f64, t: &Triangle) -> bool {
    let [a, b, c] = t.v;
    let e0 = edge_function(a, b, px, py);
    let e1 = edge_function(b, c, px, py);
    let e2 = edge_function(c, a, px, py);

    (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0) || (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
}

/// Barycentric weights of `(px, py)` with respect to `v`.
///
/// Each weight is the ratio of the sub-triangle opposite a vertex to the
/// whole triangle (both signed). Returns `None` for a zero-area triangle,
/// where the ratios are undefined.
pub fn barycentric_2d(px: f64, py: f64, v: &[Vec3; 3]) -> Option<(f64, f64, f64)> {
    let area = double_area(v);
    if area.abs() < f64::EPSILON {
        return None;
    }

    let w0 = edge_function(v[1], v[2], px, py) / area;
    let w1 = edge_function(v[2], v[0], px, py) / area;
    let w2 = edge_function(v[0], v[1], px, py) / area;
    Some((w0, w1, w2))
}

/// Strategy for turning a screen-space triangle into pixels.
pub trait TriangleRasterizer {
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer, shader: &dyn FragmentShader);
}

/// Filled, depth-tested triangles.
#[derive(Clone, Copy, Debug, Default)]
pub struct FillRasterizer;

impl FillRasterizer {
    pub fn new() -> Self {
        FillRasterizer
    }
}

impl TriangleRasterizer for FillRasterizer {
    fn rasterize(&self, t: &Triangle, buffer: &mut FrameBuffer, shader: &dyn FragmentShader) {
        if double_area(&t.v).abs() < f64::EPSILON {
            log::trace!("skipping zero-area triangle {:?}", t.v);
            return;
        }
        let [v0, v1, v2] = t.v;

        // Bounding box, truncated to integers and clipped to the buffer
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).floor() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).floor() as i32).min(buffer.height() as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                if !inside_triangle(px, py, t) {
                    continue;
                }
                let Some((w0, w1, w2)) = barycentric_2d(px, py, &t.v) else {
                    continue;
                };

                let z = w0 * v0.z + w1 * v1.z + w2 * v2.z;
                if buffer.get_depth(x, y).is_some_and(|d| z >= d) {
                    continue;
                }

                let fragment = FragmentPayload {
                    position: Vec3::new(px, py, z),
                    color: t.color[0] * w0 + t.color[1] * w1 + t.color[2] * w2,
                    normal: t.normal[0] * w0 + t.normal[1] * w1 + t.normal[2] * w2,
                    tex_coords: t.tex_coords[0] * w0
                        + t.tex_coords[1] * w1
                        + t.tex_coords[2] * w2,
                };
                buffer.set_pixel_with_depth(x, y, z, shader.shade(&fragment));
            }
        }
    }
}

/// Triangle outlines in white. Ignores the depth buffer entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct WireframeRasterizer;

impl WireframeRasterizer {
    pub fn new() -> Self {
        WireframeRasterizer
    }
}

impl TriangleRasterizer for WireframeRasterizer {
    fn rasterize(&self, t: &Triangle, buffer: &mut FrameBuffer, _shader: &dyn FragmentShader) {
        draw_line(buffer, t.c(), t.a(), colors::WHITE);
        draw_line(buffer, t.c(), t.b(), colors::WHITE);
        draw_line(buffer, t.b(), t.a(), colors::WHITE);
    }
}

/// How triangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Fill,
    Wireframe,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Fill => write!(f, "Fill"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
        }
    }
}

/// Holds both rasterizers and forwards to the active one.
#[derive(Debug, Default)]
pub struct RasterizerDispatcher {
    fill: FillRasterizer,
    wireframe: WireframeRasterizer,
    active: RenderMode,
}

impl RasterizerDispatcher {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            fill: FillRasterizer::new(),
            wireframe: WireframeRasterizer::new(),
            active: mode,
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.active = mode;
    }

    pub fn mode(&self) -> RenderMode {
        self.active
    }
}

impl TriangleRasterizer for RasterizerDispatcher {
    #[inline]
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer, shader: &dyn FragmentShader) {
        match self.active {
            RenderMode::Fill => self.fill.rasterize(triangle, buffer, shader),
            RenderMode::Wireframe => self.wireframe.rasterize(triangle, buffer, shader),
        }
    }
}
