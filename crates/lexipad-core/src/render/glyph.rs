//! Bitmap glyph table and text drawing.

use st7920::FrameBuffer;

use crate::text_policy::is_wide;

/// Height of every glyph cell in pixels.
pub const GLYPH_HEIGHT: i32 = 16;
/// Advance of a narrow (codepoint < 128) glyph.
pub const NARROW_ADVANCE: i32 = 8;
/// Advance of a wide glyph.
pub const WIDE_ADVANCE: i32 = 16;
/// Codepoints covered by a complete table.
pub const CODEPOINTS: usize = 65_536;
/// Size of a complete [`GlyphLayout::Unifont`] table.
pub const UNIFONT_TABLE_BYTES: usize = CODEPOINTS * 32;

/// How glyph cells are laid out inside the table blob.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GlyphLayout {
    /// 32 bytes per codepoint (2 bytes per row); narrow glyphs use the left byte.
    #[default]
    Unifont,
    /// Narrow cells are 16 bytes at `cp * 16`, wide cells 32 bytes at `cp * 32`.
    Packed,
}

struct Cell<'a> {
    rows: &'a [u8],
    row_stride: usize,
    row_bytes: usize,
}

/// Read-only glyph bitmap table shared by all drawing calls.
#[derive(Clone, Copy, Debug)]
pub struct GlyphTable<'a> {
    bytes: &'a [u8],
    layout: GlyphLayout,
}

impl<'a> GlyphTable<'a> {
    pub const fn new(bytes: &'a [u8], layout: GlyphLayout) -> Self {
        Self { bytes, layout }
    }

    /// Table in the layout written by the offline Unifont converter.
    pub const fn unifont(bytes: &'a [u8]) -> Self {
        Self::new(bytes, GlyphLayout::Unifont)
    }

    pub fn layout(&self) -> GlyphLayout {
        self.layout
    }

    /// Horizontal advance of `ch` in pixels.
    pub fn advance(ch: char) -> i32 {
        if is_wide(ch) { WIDE_ADVANCE } else { NARROW_ADVANCE }
    }

    /// Width of the widest line of `text` in pixels.
    pub fn text_width(text: &str) -> i32 {
        text.split('\n')
            .map(|line| line.chars().map(Self::advance).sum::<i32>())
            .max()
            .unwrap_or(0)
    }

    fn cell(&self, ch: char) -> Option<Cell<'a>> {
        let codepoint = ch as usize;
        if codepoint >= CODEPOINTS {
            return None;
        }

        let wide = is_wide(ch);
        let (offset, row_stride, row_bytes) = match (self.layout, wide) {
            (GlyphLayout::Unifont, false) => (codepoint * 32, 2, 1),
            (GlyphLayout::Unifont, true) => (codepoint * 32, 2, 2),
            (GlyphLayout::Packed, false) => (codepoint * 16, 1, 1),
            (GlyphLayout::Packed, true) => (codepoint * 32, 2, 2),
        };
        let len = row_stride * GLYPH_HEIGHT as usize;

        Some(Cell {
            rows: self.bytes.get(offset..offset + len)?,
            row_stride,
            row_bytes,
        })
    }

    /// Draws one glyph with its top-left corner at `(x, y)`.
    ///
    /// Only the glyph's own "on" bits are written (as `on`); every other pixel
    /// is left untouched. Glyphs missing from the table draw nothing.
    pub fn draw_glyph(&self, frame: &mut FrameBuffer, x: i32, y: i32, ch: char, on: bool) {
        let Some(cell) = self.cell(ch) else {
            return;
        };

        for (dy, row) in cell.rows.chunks_exact(cell.row_stride).enumerate() {
            for (byte_index, bits) in row[..cell.row_bytes].iter().enumerate() {
                if *bits == 0 {
                    continue;
                }
                for bit in 0..8 {
                    if bits & (0x80 >> bit) != 0 {
                        let px = x + (byte_index * 8 + bit) as i32;
                        set_pixel_signed(frame, px, y + dy as i32, on);
                    }
                }
            }
        }
    }

    /// Draws `text` starting at `(x, y)`.
    ///
    /// `\n` returns to the starting column one glyph row lower. There is no
    /// automatic wrapping; callers wrap with [`crate::text_policy::word_wrap`].
    pub fn draw_text(&self, frame: &mut FrameBuffer, x: i32, y: i32, text: &str, on: bool) {
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y += GLYPH_HEIGHT;
                continue;
            }

            self.draw_glyph(frame, cursor_x, cursor_y, ch, on);
            cursor_x += Self::advance(ch);
        }
    }
}

fn set_pixel_signed(frame: &mut FrameBuffer, x: i32, y: i32, on: bool) {
    if x < 0 || y < 0 {
        return;
    }

    frame.set_pixel(x as usize, y as usize, on);
}
