//! Color constants and conversions.
//!
//! Colors are RGB triples in the 0-255 range, kept as floating point so that
//! barycentric interpolation does not round between vertices. They are only
//! quantized to bytes when the frame is handed to a presenter.

use crate::math::vec3::Vec3;

pub type Color = Vec3;

pub const BLACK: Color = Vec3::new(0.0, 0.0, 0.0);
pub const WHITE: Color = Vec3::new(255.0, 255.0, 255.0);

/// Flat color given to every vertex of a mesh drawn through `draw_obj`.
pub const MESH_DEBUG: Color = Vec3::new(148.0, 121.0, 92.0);

/// Quantize a color to 8-bit channels, clamping out-of-range and NaN values.
#[inline]
pub fn to_rgb8(color: Color) -> [u8; 3] {
    [channel(color.x), channel(color.y), channel(color.z)]
}

#[inline]
fn channel(value: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    value.round().clamp(0.0, 255.0) as u8
}
