//! Pixel-level rendering: frame buffer, line drawing and triangle scan
//! conversion.

mod framebuffer;
mod line;
mod raster;

pub use framebuffer::{ClearMask, FrameBuffer};
pub use line::draw_line;
pub use raster::{
    barycentric_2d, inside_triangle, FillRasterizer, RasterizerDispatcher, RenderMode,
    TriangleRasterizer, WireframeRasterizer,
};
