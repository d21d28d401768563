//! Screen view model and the shared list renderer.

pub mod glyph;

use heapless::Vec as HeaplessVec;
use st7920::{
    FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};

pub use glyph::{GlyphLayout, GlyphTable};

use glyph::GLYPH_HEIGHT;

/// Text lines on the panel: one title line plus the list body.
pub const SCREEN_LINES: usize = HEIGHT / GLYPH_HEIGHT as usize;
/// Lines available to list items below the title.
pub const BODY_LINES: usize = SCREEN_LINES - 1;
/// Shown in place of an empty list.
pub const EMPTY_PLACEHOLDER: &str = "(None)";

/// One rendered body line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RowView<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Screen<'a> {
    pub title: &'a str,
    pub invert_title: bool,
    pub rows: HeaplessVec<RowView<'a>, BODY_LINES>,
}

impl Screen<'_> {
    /// Texts of the body rows, top to bottom.
    pub fn row_texts(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.text)
    }

    /// Body row drawn inverted, if any.
    pub fn highlighted_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.highlighted)
    }
}

/// Paints `screen` into `frame`, replacing its previous content.
pub fn render_screen(screen: &Screen<'_>, glyphs: &GlyphTable<'_>, frame: &mut FrameBuffer) {
    frame.fill(false);

    draw_line(frame, glyphs, 0, screen.title, screen.invert_title);
    for (line, row) in screen.rows.iter().enumerate() {
        draw_line(frame, glyphs, line + 1, row.text, row.highlighted);
    }
}

fn draw_line(
    frame: &mut FrameBuffer,
    glyphs: &GlyphTable<'_>,
    line: usize,
    text: &str,
    inverted: bool,
) {
    let top = line * GLYPH_HEIGHT as usize;
    if inverted {
        frame.draw_rectangle(0, top, WIDTH - 1, top + GLYPH_HEIGHT as usize - 1, true);
    }
    glyphs.draw_text(frame, 0, top as i32, text, !inverted);
}
