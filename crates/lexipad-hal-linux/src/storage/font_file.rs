use std::{fmt, fs, io, path::Path};

use lexipad_core::render::{
    GlyphLayout, GlyphTable,
    glyph::UNIFONT_TABLE_BYTES,
};
use log::info;

#[derive(Debug)]
pub enum FontError {
    Io(io::Error),
    /// The blob does not cover the whole Basic Multilingual Plane.
    Size { expected: usize, actual: usize },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "reading font file: {err}"),
            Self::Size { expected, actual } => {
                write!(f, "font file is {actual} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Size { .. } => None,
        }
    }
}

impl From<io::Error> for FontError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Owned glyph table blob, 32 bytes per codepoint for U+0000..=U+FFFF.
#[derive(Clone, Debug)]
pub struct FontFile {
    bytes: Vec<u8>,
    layout: GlyphLayout,
}

impl FontFile {
    pub fn load(path: impl AsRef<Path>, layout: GlyphLayout) -> Result<Self, FontError> {
        let path = path.as_ref();
        let font = Self::from_bytes(fs::read(path)?, layout)?;
        info!("font: loaded {} ({:?})", path.display(), layout);
        Ok(font)
    }

    pub fn from_bytes(bytes: Vec<u8>, layout: GlyphLayout) -> Result<Self, FontError> {
        if bytes.len() != UNIFONT_TABLE_BYTES {
            return Err(FontError::Size {
                expected: UNIFONT_TABLE_BYTES,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, layout })
    }

    pub fn glyphs(&self) -> GlyphTable<'_> {
        GlyphTable::new(&self.bytes, self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_truncated_tables() {
        let err = FontFile::from_bytes(vec![0; 1024], GlyphLayout::Unifont).unwrap_err();
        assert!(matches!(
            err,
            FontError::Size {
                expected: UNIFONT_TABLE_BYTES,
                actual: 1024,
            }
        ));
    }

    #[test]
    fn loads_a_full_table_from_disk() {
        let path = std::env::temp_dir().join(format!("lexipad-font-{}.bin", std::process::id()));
        let mut bytes = vec![0u8; UNIFONT_TABLE_BYTES];
        bytes['A' as usize * 32] = 0x80;
        fs::write(&path, &bytes).unwrap();

        let font = FontFile::load(&path, GlyphLayout::Unifont);
        fs::remove_file(&path).unwrap();
        let font = font.unwrap();

        let mut frame = st7920::FrameBuffer::new();
        font.glyphs().draw_text(&mut frame, 0, 0, "A", true);
        assert!(frame.pixel(0, 0));
        assert_eq!(font.glyphs().layout(), GlyphLayout::Unifont);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FontFile::load("/nonexistent/lexipad/unifont.bin", GlyphLayout::Unifont)
            .unwrap_err();
        assert!(matches!(err, FontError::Io(_)));
    }
}
