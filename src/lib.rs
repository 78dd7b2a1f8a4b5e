//! A CPU-based software rasterizer.
//!
//! Triangles go through a classic fixed pipeline: model, view and projection
//! transforms, perspective divide, viewport mapping, then scan conversion into
//! a color buffer guarded by a z-buffer. Everything runs on the CPU; the
//! caller reads the finished frame back from [`Rasterizer::frame_buffer`].
//!
//! # Quick Start
//!
//! ```
//! use rastrum::prelude::*;
//!
//! let mut r = Rasterizer::new(64, 64);
//! r.set_view(view_matrix(Vec3::new(0.0, 0.0, 5.0)));
//! r.set_projection(Projection::default().matrix());
//! r.draw_obj("v -1 -1 0\nv 1 -1 0\nv 0 1 0\nf 1 2 3\n")?;
//!
//! let image = r.frame_buffer().to_image();
//! assert_eq!(image.dimensions(), (64, 64));
//! # Ok::<(), rastrum::Error>(())
//! ```

// Public API - exposed to library consumers
pub mod buffers;
pub mod colors;
pub mod error;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod rasterizer;
pub mod render;
pub mod shader;
pub mod transform;
pub mod triangle;

// Re-export commonly needed types at crate root for convenience
pub use buffers::BufferId;
pub use error::{Error, Result};
pub use projection::{DepthRange, Projection};
pub use rasterizer::{Primitive, Rasterizer};
pub use render::{ClearMask, RenderMode};
pub use transform::Transform;
pub use triangle::Triangle;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rastrum::prelude::*;
/// ```
pub mod prelude {
    // Rasterizer
    pub use crate::buffers::BufferId;
    pub use crate::rasterizer::{Primitive, Rasterizer};
    pub use crate::render::{ClearMask, RenderMode};

    // Colors & shading
    pub use crate::colors::{Color, BLACK, WHITE};
    pub use crate::shader::{FragmentShader, NormalShader, VertexColorShader};

    // Transforms & projection
    pub use crate::projection::{DepthRange, Projection};
    pub use crate::transform::{model_matrix, projection_matrix, view_matrix, Transform};

    // Math
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    // Geometry
    pub use crate::mesh::{load_obj, load_obj_file};
    pub use crate::triangle::Triangle;
}
