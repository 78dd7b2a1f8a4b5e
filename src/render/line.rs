//! Bresenham line drawing.

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::math::Vec3;

/// Draws a line between two screen-space points using Bresenham's algorithm.
///
/// The segment is first clipped to the buffer rectangle, so endpoints far
/// off-screen (or projected from just in front of the eye) cost nothing.
/// Non-finite endpoints draw nothing. Clipped endpoint coordinates are then
/// truncated to integers. The axis with the larger extent is stepped one
/// pixel at a time; a decision variable tracks the distance to the ideal line
/// and says when to also step along the minor axis, upwards or downwards
/// depending on whether both deltas share a sign. Both endpoints are drawn.
/// Depth is ignored.
pub fn draw_line(buffer: &mut FrameBuffer, begin: Vec3, end: Vec3, color: Color) {
    let Some((begin, end)) = clip_to_buffer(begin, end, buffer.width(), buffer.height()) else {
        return;
    };
    let (x1, y1) = (begin.0 as i64, begin.1 as i64);
    let (x2, y2) = (end.0 as i64, end.1 as i64);

    let dx = x2 - x1;
    let dy = y2 - y1;
    let dx1 = dx.abs();
    let dy1 = dy.abs();
    // Minor axis steps in the positive direction when both deltas agree in sign
    let same_sign = (dx < 0 && dy < 0) || (dx > 0 && dy > 0);

    if dy1 <= dx1 {
        // X-major: always walk left to right
        let (mut x, mut y, xe) = if dx >= 0 { (x1, y1, x2) } else { (x2, y2, x1) };
        let mut px = 2 * dy1 - dx1;
        plot(buffer, x, y, color);

        while x < xe {
            x += 1;
            if px < 0 {
                px += 2 * dy1;
            } else {
                y += if same_sign { 1 } else { -1 };
                px += 2 * (dy1 - dx1);
            }
            plot(buffer, x, y, color);
        }
    } else {
        // Y-major: always walk bottom to top
        let (mut x, mut y, ye) = if dy >= 0 { (x1, y1, y2) } else { (x2, y2, y1) };
        let mut py = 2 * dx1 - dy1;
        plot(buffer, x, y, color);

        while y < ye {
            y += 1;
            if py <= 0 {
                py += 2 * dx1;
            } else {
                x += if same_sign { 1 } else { -1 };
                py += 2 * (dx1 - dy1);
            }
            plot(buffer, x, y, color);
        }
    }
}

#[inline]
fn plot(buffer: &mut FrameBuffer, x: i64, y: i64, color: Color) {
    // Coordinates are clipped to the buffer, so they fit in i32
    buffer.set_pixel(x as i32, y as i32, color);
}

/// Liang-Barsky clip of the segment to `[0, width] x [0, height]`.
///
/// The far edges are inclusive so that truncation still lands on the last
/// column and row; points exactly on them are dropped by `set_pixel`. An
/// endpoint already inside is returned unchanged.
fn clip_to_buffer(
    begin: Vec3,
    end: Vec3,
    width: u32,
    height: u32,
) -> Option<((f64, f64), (f64, f64))> {
    if width == 0 || height == 0 {
        return None;
    }
    if ![begin.x, begin.y, end.x, end.y].iter().all(|v| v.is_finite()) {
        log::trace!("skipping line with non-finite endpoint {:?} -> {:?}", begin, end);
        return None;
    }

    let (dx, dy) = (end.x - begin.x, end.y - begin.y);
    let (x_max, y_max) = (width as f64, height as f64);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, begin.x),
        (dx, x_max - begin.x),
        (-dy, begin.y),
        (dy, y_max - begin.y),
    ] {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| (begin.x + dx * t, begin.y + dy * t);
    let clipped_begin = if t0 > 0.0 { at(t0) } else { (begin.x, begin.y) };
    let clipped_end = if t1 < 1.0 { at(t1) } else { (end.x, end.y) };
    Some((clipped_begin, clipped_end))
}
