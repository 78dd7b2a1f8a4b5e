//! The rasterizer: owns the frame and depth buffers, the vertex data
//! registries and the current transforms, and runs triangles from object
//! space to pixels.
//!
//! A typical frame:
//!
//! ```
//! use rastrum::prelude::*;
//!
//! let mut r = Rasterizer::new(100, 100);
//! let pos = r.load_positions(vec![
//!     Vec3::new(2.0, 0.0, -2.0),
//!     Vec3::new(0.0, 2.0, -2.0),
//!     Vec3::new(-2.0, 0.0, -2.0),
//! ]);
//! let ind = r.load_indices(vec![[0, 1, 2]]);
//! let col = r.load_colors(vec![Vec3::new(217.0, 238.0, 185.0); 3]);
//!
//! r.clear(ClearMask::COLOR | ClearMask::DEPTH);
//! r.set_model(model_matrix(0.0));
//! r.set_view(view_matrix(Vec3::new(0.0, 0.0, 5.0)));
//! r.set_projection(Projection::default().matrix());
//! r.draw(pos, ind, col, Primitive::Triangle)?;
//!
//! assert_ne!(r.pixel(50, 55), Some(BLACK));
//! # Ok::<(), rastrum::Error>(())
//! ```

use log::debug;

use crate::buffers::{BufferId, BufferRegistry};
use crate::colors::{self, Color};
use crate::error::{Error, Result};
use crate::math::{Mat4, Vec3};
use crate::mesh;
use crate::projection::DepthRange;
use crate::render::{
    ClearMask, FrameBuffer, RasterizerDispatcher, RenderMode, TriangleRasterizer,
};
use crate::shader::{FragmentShader, VertexColorShader};
use crate::transform::Transform;
use crate::triangle::Triangle;

/// Primitive kinds accepted by [`Rasterizer::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Declared for completeness; drawing it fails with
    /// [`Error::UnsupportedPrimitive`].
    Line,
    Triangle,
}

pub struct Rasterizer {
    frame: FrameBuffer,
    buffers: BufferRegistry,
    transform: Transform,
    dispatcher: RasterizerDispatcher,
    depth_range: DepthRange,
    shader: Box<dyn FragmentShader + Send>,
}

impl Default for Rasterizer {
    /// A 0x0 rasterizer; call [`Rasterizer::init`] before drawing.
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            buffers: BufferRegistry::new(),
            transform: Transform::default(),
            dispatcher: RasterizerDispatcher::new(RenderMode::default()),
            depth_range: DepthRange::default(),
            shader: Box::new(VertexColorShader),
        }
    }

    /// Allocates fresh `width * height` color (black) and depth (`+∞`)
    /// buffers, replacing the current ones. Registries and transforms are
    /// kept.
    pub fn init(&mut self, width: u32, height: u32) {
        debug!("init frame buffer {}x{}", width, height);
        self.frame = FrameBuffer::new(width, height);
    }

    /// Same as [`Rasterizer::init`]; for hosts reacting to a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.init(width, height);
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn clear(&mut self, mask: ClearMask) {
        self.frame.clear(mask);
    }

    pub fn load_positions(&mut self, positions: Vec<Vec3>) -> BufferId {
        self.buffers.load_positions(positions)
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> BufferId {
        self.buffers.load_indices(indices)
    }

    pub fn load_colors(&mut self, colors: Vec<Color>) -> BufferId {
        self.buffers.load_colors(colors)
    }

    /// The id the next load of any kind will return.
    pub fn next_id(&self) -> BufferId {
        self.buffers.next_id()
    }

    pub fn set_model(&mut self, m: Mat4) {
        self.transform.model = m;
    }

    pub fn set_view(&mut self, v: Mat4) {
        self.transform.view = v;
    }

    pub fn set_projection(&mut self, p: Mat4) {
        self.transform.projection = p;
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.dispatcher.set_mode(mode);
    }

    pub fn render_mode(&self) -> RenderMode {
        self.dispatcher.mode()
    }

    pub fn set_depth_range(&mut self, range: DepthRange) {
        self.depth_range = range;
    }

    pub fn depth_range(&self) -> DepthRange {
        self.depth_range
    }

    pub fn set_fragment_shader<S>(&mut self, shader: S)
    where
        S: FragmentShader + Send + 'static,
    {
        self.shader = Box::new(shader);
    }

    /// Draws indexed triangles from previously loaded buffers.
    ///
    /// Every index triple picks three positions and the three colors at the
    /// same indices. An unknown id or an out-of-range index fails the call
    /// before anything is drawn.
    pub fn draw(
        &mut self,
        pos_buffer: BufferId,
        ind_buffer: BufferId,
        col_buffer: BufferId,
        primitive: Primitive,
    ) -> Result<()> {
        if primitive != Primitive::Triangle {
            return Err(Error::UnsupportedPrimitive(primitive));
        }

        let positions = self.buffers.positions(pos_buffer)?;
        let indices = self.buffers.indices(ind_buffer)?;
        let colors = self.buffers.colors(col_buffer)?;

        let mut triangles = Vec::with_capacity(indices.len());
        for face in indices {
            let mut t = Triangle::new();
            for (i, &index) in face.iter().enumerate() {
                let position = positions.get(index).ok_or(Error::IndexOutOfRange {
                    what: "position",
                    index: index as i64,
                    len: positions.len(),
                })?;
                let color = colors.get(index).ok_or(Error::IndexOutOfRange {
                    what: "color",
                    index: index as i64,
                    len: colors.len(),
                })?;
                t.set_vertex(i, *position);
                t.color[i] = *color;
            }
            triangles.push(t);
        }

        self.draw_triangles(&triangles)
    }

    /// Parses `text` as an OBJ mesh and draws it with every vertex in the
    /// mesh debug color.
    pub fn draw_obj(&mut self, text: &str) -> Result<()> {
        let mut triangles = mesh::load_obj(text)?;
        for t in &mut triangles {
            t.color = [colors::MESH_DEBUG; 3];
        }
        self.draw_triangles(&triangles)
    }

    /// Projects object-space triangles to the screen and scan-converts them
    /// with the active render mode and fragment shader. Nothing is drawn if
    /// any vertex fails to project.
    pub fn draw_triangles(&mut self, triangles: &[Triangle]) -> Result<()> {
        let mvp = self.transform.mvp();
        debug!(
            "drawing {} triangles ({} mode)",
            triangles.len(),
            self.dispatcher.mode()
        );

        let screen = triangles
            .iter()
            .map(|t| self.to_screen(t, &mvp))
            .collect::<Result<Vec<_>>>()?;
        for t in &screen {
            self.dispatcher
                .rasterize(t, &mut self.frame, self.shader.as_ref());
        }
        Ok(())
    }

    /// MVP transform, perspective divide, viewport map and depth remap.
    /// Colors, normals and texture coordinates are carried over untouched.
    fn to_screen(&self, t: &Triangle, mvp: &Mat4) -> Result<Triangle> {
        let half_w = 0.5 * self.frame.width() as f64;
        let half_h = 0.5 * self.frame.height() as f64;

        let mut screen = *t;
        for (i, v) in t.to_vector4().into_iter().enumerate() {
            let ndc = (*mvp * v).perspective_divide()?;
            screen.set_vertex(
                i,
                Vec3::new(
                    half_w * (ndc.x + 1.0),
                    half_h * (ndc.y + 1.0),
                    self.depth_range.remap(ndc.z),
                ),
            );
        }
        Ok(screen)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn color_buffer(&self) -> &[Color] {
        self.frame.color_buffer()
    }

    pub fn depth_buffer(&self) -> &[f64] {
        self.frame.depth_buffer()
    }

    /// Color at pixel `(x, y)`, y up. `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.frame.get_pixel(x, y)
    }

    pub fn depth(&self, x: i32, y: i32) -> Option<f64> {
        self.frame.get_depth(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffers::BufferKind;
    use crate::colors::{BLACK, WHITE};
    use crate::projection::Projection;
    use crate::shader::NormalShader;
    use crate::transform::{model_matrix, view_matrix};
    use approx::assert_relative_eq;

    const GREEN: Color = Vec3::new(217.0, 238.0, 185.0);
    const BLUE: Color = Vec3::new(185.0, 217.0, 238.0);

    /// Interpolated colors can be off by a few ulps; compare as bytes.
    fn rgb(r: &Rasterizer, x: i32, y: i32) -> [u8; 3] {
        colors::to_rgb8(r.pixel(x, y).unwrap())
    }

    fn all_pixels(r: &Rasterizer, color: Color) -> bool {
        r.color_buffer()
            .iter()
            .all(|&c| colors::to_rgb8(c) == colors::to_rgb8(color))
    }

    /// Two triangles that cover the whole NDC square, at z = `near_z` and
    /// z = `far_z`, drawn in the given order with identity transforms.
    fn full_screen_pair(first_near: bool) -> Rasterizer {
        let mut r = Rasterizer::new(16, 16);
        let pos = r.load_positions(vec![
            Vec3::new(-1.0, -1.0, 0.5),
            Vec3::new(3.0, -1.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.5),
            Vec3::new(-1.0, -1.0, -0.5),
            Vec3::new(3.0, -1.0, -0.5),
            Vec3::new(-1.0, 3.0, -0.5),
        ]);
        let col = r.load_colors(vec![BLUE, BLUE, BLUE, GREEN, GREEN, GREEN]);
        let far = r.load_indices(vec![[0, 1, 2]]);
        let near = r.load_indices(vec![[3, 4, 5]]);

        let order = if first_near { [near, far] } else { [far, near] };
        for ind in order {
            r.draw(pos, ind, col, Primitive::Triangle).unwrap();
        }
        r
    }

    #[test]
    fn new_allocates_cleared_buffers() {
        let r = Rasterizer::new(100, 100);
        assert_eq!(r.color_buffer().len(), 10_000);
        assert_eq!(r.depth_buffer().len(), 10_000);
        assert!(r.depth_buffer().iter().all(|&d| d == f64::INFINITY));
        assert!(r.color_buffer().iter().all(|&c| c == BLACK));
    }

    #[test]
    fn init_replaces_buffers() {
        let mut r = Rasterizer::default();
        assert!(r.color_buffer().is_empty());

        r.init(100, 100);
        r.init(100, 100);
        assert_eq!(r.color_buffer().len(), 10_000);

        r.resize(20, 10);
        assert_eq!((r.width(), r.height()), (20, 10));
        assert_eq!(r.depth_buffer().len(), 200);
    }

    #[test]
    fn clear_resets_selected_buffers() {
        let mut r = full_screen_pair(true);
        r.clear(ClearMask::COLOR);
        assert!(r.color_buffer().iter().all(|&c| c == BLACK));
        assert!(r.depth_buffer().iter().all(|&d| d.is_finite()));

        r.clear(ClearMask::DEPTH);
        assert!(r.depth_buffer().iter().all(|&d| d == f64::INFINITY));
    }

    #[test]
    fn buffer_ids_come_from_one_counter() {
        let mut r = Rasterizer::new(1, 1);
        let pos = r.load_positions(vec![Vec3::ONE]);
        let ind = r.load_indices(vec![[0, 0, 0]]);
        let col = r.load_colors(vec![WHITE]);
        assert_eq!((pos, ind, col), (BufferId(0), BufferId(1), BufferId(2)));
        assert_eq!(r.load_positions(vec![]), BufferId(3));
        assert_eq!(r.next_id(), BufferId(4));
    }

    #[test]
    fn lines_are_unsupported() {
        let mut r = Rasterizer::new(10, 10);
        let pos = r.load_positions(vec![Vec3::ZERO; 3]);
        let ind = r.load_indices(vec![[0, 1, 2]]);
        let col = r.load_colors(vec![WHITE; 3]);
        let err = r.draw(pos, ind, col, Primitive::Line).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPrimitive(Primitive::Line)));
    }

    #[test]
    fn unknown_buffer_is_reported_by_kind() {
        let mut r = Rasterizer::new(10, 10);
        let pos = r.load_positions(vec![Vec3::ZERO; 3]);
        let ind = r.load_indices(vec![[0, 1, 2]]);
        let err = r
            .draw(pos, ind, BufferId(99), Primitive::Triangle)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::BufferNotFound {
                kind: BufferKind::Colors,
                id: BufferId(99)
            }
        ));
    }

    #[test]
    fn index_past_end_fails_without_drawing() {
        let mut r = Rasterizer::new(10, 10);
        let pos = r.load_positions(vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.0),
        ]);
        let ind = r.load_indices(vec![[0, 1, 2], [0, 1, 3]]);
        let col = r.load_colors(vec![WHITE; 3]);

        let err = r.draw(pos, ind, col, Primitive::Triangle).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                what: "position",
                index: 3,
                len: 3
            }
        ));
        assert!(r.color_buffer().iter().all(|&c| c == BLACK));
    }

    #[test]
    fn zero_w_fails() {
        let mut r = Rasterizer::new(10, 10);
        r.set_projection(Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ]));
        let mut t = Triangle::new();
        t.set_vertex(1, Vec3::new(1.0, 0.0, 0.0));
        t.set_vertex(2, Vec3::new(0.0, 1.0, 0.0));
        assert!(matches!(
            r.draw_triangles(&[t]),
            Err(Error::DegenerateHomogeneous)
        ));
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let near_first = full_screen_pair(true);
        let far_first = full_screen_pair(false);

        assert!(all_pixels(&near_first, GREEN));
        assert_eq!(near_first.color_buffer(), far_first.color_buffer());
        assert_eq!(near_first.depth_buffer(), far_first.depth_buffer());

        // NDC z = -0.5 under the default 0.1..100 remap
        assert_relative_eq!(
            near_first.depth(3, 3).unwrap(),
            -0.5 * 49.95 + 50.05,
            epsilon = 1e-9
        );
    }

    #[test]
    fn perspective_scene_resolves_overlap() {
        let mut r = Rasterizer::new(100, 100);
        let pos = r.load_positions(vec![
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(0.0, 2.0, -2.0),
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::new(3.5, -1.0, -5.0),
            Vec3::new(2.5, 1.5, -5.0),
            Vec3::new(-1.0, 0.5, -5.0),
        ]);
        let ind = r.load_indices(vec![[0, 1, 2], [3, 4, 5]]);
        let col = r.load_colors(vec![GREEN, GREEN, GREEN, BLUE, BLUE, BLUE]);

        r.set_model(model_matrix(0.0));
        r.set_view(view_matrix(Vec3::new(0.0, 0.0, 5.0)));
        r.set_projection(Projection::default().matrix());
        r.draw(pos, ind, col, Primitive::Triangle).unwrap();

        // Covered by both; the z = -2 triangle is closer to the eye
        assert_eq!(rgb(&r, 60, 55), colors::to_rgb8(GREEN));
        // Only the far triangle reaches this far right
        assert_eq!(rgb(&r, 85, 45), colors::to_rgb8(BLUE));
        assert!(r.depth(60, 55).unwrap() < r.depth(85, 45).unwrap());
        assert_eq!(r.pixel(5, 95), Some(BLACK));
    }

    #[test]
    fn obj_meshes_use_debug_color() {
        let mut r = Rasterizer::new(8, 8);
        let obj = "v -1 -1 0\nv 3 -1 0\nv -1 3 0\nf 1 2 3\n";
        r.draw_obj(obj).unwrap();
        assert!(all_pixels(&r, colors::MESH_DEBUG));
    }

    #[test]
    fn obj_errors_propagate() {
        let mut r = Rasterizer::new(8, 8);
        assert!(matches!(
            r.draw_obj("v 0 0 0\nf 1 2 3\n"),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn wireframe_draws_white_edges_only() {
        let mut r = Rasterizer::new(20, 20);
        r.set_render_mode(RenderMode::Wireframe);
        let mut t = Triangle::new();
        t.set_vertex(0, Vec3::new(-0.8, -0.8, 0.0));
        t.set_vertex(1, Vec3::new(0.8, -0.8, 0.0));
        t.set_vertex(2, Vec3::new(0.0, 0.8, 0.0));
        r.draw_triangles(&[t]).unwrap();

        // (-0.8, -0.8) maps to pixel (2, 2)
        assert_eq!(r.pixel(2, 2), Some(WHITE));
        assert_eq!(r.pixel(10, 8), Some(BLACK));
        assert!(r.color_buffer().iter().all(|&c| c == BLACK || c == WHITE));
        assert!(r.depth_buffer().iter().all(|&d| d == f64::INFINITY));
    }

    #[test]
    fn vertex_next_to_the_eye_is_clipped_in_both_modes() {
        for mode in [RenderMode::Wireframe, RenderMode::Fill] {
            let mut r = Rasterizer::new(100, 100);
            r.set_render_mode(mode);
            r.set_view(view_matrix(Vec3::new(0.0, 0.0, 5.0)));
            r.set_projection(Projection::default().matrix());
            let pos = r.load_positions(vec![
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(0.5, 0.5, 5.0 - 1e-9),
            ]);
            let ind = r.load_indices(vec![[0, 1, 2]]);
            let col = r.load_colors(vec![WHITE; 3]);

            r.draw(pos, ind, col, Primitive::Triangle).unwrap();
            if mode == RenderMode::Wireframe {
                // The edge between the two regular vertices runs along row 25
                assert_eq!(r.pixel(50, 25), Some(WHITE));
            }
        }
    }

    #[test]
    fn custom_fragment_shader_is_used() {
        let mut r = Rasterizer::new(4, 4);
        r.set_fragment_shader(NormalShader);
        let mut t = Triangle::new();
        t.set_vertex(0, Vec3::new(-1.0, -1.0, 0.0));
        t.set_vertex(1, Vec3::new(3.0, -1.0, 0.0));
        t.set_vertex(2, Vec3::new(-1.0, 3.0, 0.0));
        for i in 0..3 {
            t.set_normal(i, Vec3::new(0.0, 0.0, 1.0));
        }
        r.draw_triangles(&[t]).unwrap();
        assert_relative_eq!(
            r.pixel(1, 1).unwrap(),
            Vec3::new(127.5, 127.5, 255.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn depth_range_follows_setter() {
        let mut r = Rasterizer::new(4, 4);
        r.set_depth_range(Projection::default().depth_range());
        let mut t = Triangle::new();
        t.set_vertex(0, Vec3::new(-1.0, -1.0, -1.0));
        t.set_vertex(1, Vec3::new(3.0, -1.0, -1.0));
        t.set_vertex(2, Vec3::new(-1.0, 3.0, -1.0));
        r.draw_triangles(&[t]).unwrap();
        assert_relative_eq!(r.depth(0, 0).unwrap(), 0.1, epsilon = 1e-12);
    }
}
