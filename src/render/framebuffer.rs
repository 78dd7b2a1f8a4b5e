//! Color and depth buffers.
//!
//! Pixel `(x, y)` uses geometry orientation (y grows upwards) but rows are
//! stored top-first, so the slot is `(height - 1 - y) * width + x`. The color
//! buffer can therefore be handed to a presenter row by row without flipping.
//!
//! Depth stores remapped screen-space z; smaller values are closer. Cleared
//! depth is `+∞`, which every fragment passes.

use std::ops::BitOr;

use image::RgbImage;

use crate::colors::{self, Color};

/// Which buffers [`FrameBuffer::clear`] resets. Combine with `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearMask(u8);

impl ClearMask {
    pub const COLOR: Self = Self(1);
    pub const DEPTH: Self = Self(2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ClearMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    color_buffer: Vec<Color>,
    depth_buffer: Vec<f64>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BLACK; size],
            depth_buffer: vec![f64::INFINITY; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_buffer(&self) -> &[Color] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth_buffer
    }

    pub fn clear(&mut self, mask: ClearMask) {
        if mask.contains(ClearMask::COLOR) {
            self.color_buffer.fill(colors::BLACK);
        }
        if mask.contains(ClearMask::DEPTH) {
            self.depth_buffer.fill(f64::INFINITY);
        }
    }

    /// Storage slot of pixel `(x, y)`, or `None` outside the buffer.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((self.height as usize - 1 - y as usize) * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a pixel without depth testing. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Depth-tested write.
    ///
    /// Color and depth are written together, and only when `depth` is
    /// strictly less than the stored value. Returns whether the write
    /// happened.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f64, color: Color) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// RGBA bytes, top row first, with an opaque alpha channel appended to
    /// every pixel. This is the layout canvas-style presenters expect.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|&c| {
                let [r, g, b] = colors::to_rgb8(c);
                [r, g, b, 0xFF]
            })
            .collect()
    }

    /// Copy the color buffer into an [`RgbImage`].
    pub fn to_image(&self) -> RgbImage {
        let bytes = self
            .color_buffer
            .iter()
            .flat_map(|&c| colors::to_rgb8(c))
            .collect();
        // Length is width * height * 3 by construction
        RgbImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}
