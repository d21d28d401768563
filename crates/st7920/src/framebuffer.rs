//! In-memory framebuffer for the 128x64 ST7920 panel.

use crate::protocol::{BUFFER_SIZE, HEIGHT, LINE_BYTES, WIDTH};

/// 1bpp framebuffer for the panel.
///
/// Bit mapping within one line byte: bit 7 is the first pixel in that byte.
/// Coordinates outside the panel are ignored by every mutator, and read back
/// as `false`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a new blank framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Creates a framebuffer with every pixel set to `on`.
    pub const fn filled(on: bool) -> Self {
        Self {
            bytes: [if on { 0xFF } else { 0x00 }; BUFFER_SIZE],
        }
    }

    /// Byte index holding pixel `(x, y)`.
    #[inline]
    pub const fn point_to_index(x: usize, y: usize) -> usize {
        x / 8 + y * LINE_BYTES
    }

    #[inline]
    const fn bit_mask(x: usize) -> u8 {
        0x80 >> (x % 8)
    }

    #[inline]
    const fn in_bounds(x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Returns mutable framebuffer bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// Sets every pixel to `on`.
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Reads the byte containing pixel `(x, y)`, `0` when out of bounds.
    pub fn byte(&self, x: usize, y: usize) -> u8 {
        if !Self::in_bounds(x, y) {
            return 0;
        }
        self.bytes[Self::point_to_index(x, y)]
    }

    /// Overwrites the byte containing pixel `(x, y)`.
    pub fn set_byte(&mut self, x: usize, y: usize, value: u8) {
        if Self::in_bounds(x, y) {
            self.bytes[Self::point_to_index(x, y)] = value;
        }
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        Self::in_bounds(x, y) && (self.bytes[Self::point_to_index(x, y)] & Self::bit_mask(x)) != 0
    }

    /// Sets a pixel state.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if !Self::in_bounds(x, y) {
            return;
        }

        let index = Self::point_to_index(x, y);
        let mask = Self::bit_mask(x);
        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
    }

    /// Fills the rectangle spanned by two inclusive corners.
    ///
    /// Corners may be given in any order. The part outside the panel is clipped.
    pub fn draw_rectangle(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, on: bool) {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

        if left >= WIDTH || top >= HEIGHT {
            return;
        }
        let right = right.min(WIDTH - 1);
        let bottom = bottom.min(HEIGHT - 1);

        for y in top..=bottom {
            for x in left..=right {
                self.set_pixel(x, y, on);
            }
        }
    }

    /// Returns the 16-bit display word at `index` (raster order) as its two bytes.
    pub fn word(&self, index: usize) -> Option<[u8; 2]> {
        let start = index.checked_mul(2)?;
        let pair = self.bytes.get(start..start + 2)?;
        Some([pair[0], pair[1]])
    }
}
