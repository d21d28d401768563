//! Wire-level protocol helpers for the ST7920 serial interface.

use crate::FrameBuffer;

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Number of bytes in one display line.
pub const LINE_BYTES: usize = WIDTH / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;
/// Number of 16-bit words in one display line.
pub const LINE_WORDS: usize = LINE_BYTES / 2;
/// Total number of 16-bit words in the framebuffer.
pub const WORD_COUNT: usize = BUFFER_SIZE / 2;
/// Rows covered by one half-screen address space.
pub const HALF_HEIGHT: usize = HEIGHT / 2;

const _: () = assert!(WIDTH % 16 == 0 && HEIGHT % 16 == 0);

/// Function set: 8-bit interface, basic instruction set.
pub const CMD_BASIC_SET: u8 = 0x30;
/// Clear DDRAM so text memory does not bleed into the graphics layer.
pub const CMD_CLEAR: u8 = 0x01;
/// Function set: extended instruction set.
pub const CMD_EXTENDED_SET: u8 = 0x34;
/// Extended function set with graphic display on.
pub const CMD_GRAPHICS_ON: u8 = 0x36;
/// Base of the GDRAM address command (`0x80 | address`).
pub const CMD_SET_ADDRESS: u8 = 0x80;

/// Pulses in one framed byte transfer.
///
/// Layout:
/// - 5 sync pulses (high)
/// - R/W (low = write)
/// - RS (low = command, high = data)
/// - 1 separator (low)
/// - high nibble, MSB first
/// - 4 separators (low)
/// - low nibble, MSB first
/// - 4 separators (low)
pub const BYTE_FRAME_BITS: usize = 5 + 1 + 1 + 1 + 4 + 4 + 4 + 4;

/// Register select line level.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Register {
    /// RS low.
    Command,
    /// RS high.
    Data,
}

impl Register {
    #[inline]
    pub const fn level(self) -> bool {
        matches!(self, Self::Data)
    }
}

/// Builds the pulse sequence for one byte transfer.
pub fn byte_frame_bits(register: Register, value: u8) -> [bool; BYTE_FRAME_BITS] {
    let mut bits = [false; BYTE_FRAME_BITS];
    let mut n = 0usize;

    for _ in 0..5 {
        bits[n] = true;
        n += 1;
    }

    // R/W stays low: the panel is write-only in serial mode.
    n += 1;
    bits[n] = register.level();
    n += 1;
    n += 1;

    for shift in (4..8).rev() {
        bits[n] = (value >> shift) & 1 != 0;
        n += 1;
    }
    n += 4;

    for shift in (0..4).rev() {
        bits[n] = (value >> shift) & 1 != 0;
        n += 1;
    }

    bits
}

/// GDRAM address of one display word, in (horizontal word, vertical row) units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordAddress {
    pub x: u8,
    pub y: u8,
}

/// Maps a raster-order word index to its GDRAM address.
///
/// The panel is split into an upper and a lower half; the lower half lives
/// to the right of the upper half in address space.
///
/// Returns `None` for indices past the end of the framebuffer.
pub fn word_address(index: usize) -> Option<WordAddress> {
    if index >= WORD_COUNT {
        return None;
    }

    let column = index % LINE_WORDS;
    let row = index / LINE_WORDS;
    let (x, y) = if row < HALF_HEIGHT {
        (column, row)
    } else {
        (column + LINE_WORDS, row - HALF_HEIGHT)
    };

    Some(WordAddress {
        x: x as u8,
        y: y as u8,
    })
}

/// Address command pair for a word: vertical first, then horizontal.
pub fn address_commands(address: WordAddress) -> [u8; 2] {
    [CMD_SET_ADDRESS | address.y, CMD_SET_ADDRESS | address.x]
}

/// One word that has to be written to bring the panel up to date.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordWrite {
    pub index: usize,
    pub address: WordAddress,
    pub data: [u8; 2],
}

/// The write needed to send word `index` of `frame`.
pub fn word_write(frame: &FrameBuffer, index: usize) -> Option<WordWrite> {
    Some(WordWrite {
        index,
        address: word_address(index)?,
        data: frame.word(index)?,
    })
}

/// Words of `target` that differ from `current`, in raster order.
pub fn diff_words<'a>(
    current: &'a FrameBuffer,
    target: &'a FrameBuffer,
) -> impl Iterator<Item = WordWrite> + 'a {
    (0..WORD_COUNT)
        .filter(move |&index| current.word(index) != target.word(index))
        .filter_map(move |index| word_write(target, index))
}

/// Every word of `target`, in raster order.
pub fn all_words(target: &FrameBuffer) -> impl Iterator<Item = WordWrite> + '_ {
    (0..WORD_COUNT).filter_map(move |index| word_write(target, index))
}
