//! The twelve standard Type1 fonts and a rough width model for them.

use crate::models::CharFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Sans,
    Serif,
    Mono,
}

impl FontFace {
    pub fn for_family(family: &str) -> Self {
        let family = family.to_ascii_lowercase();
        if ["courier", "mono", "consolas", "menlo", "code"]
            .iter()
            .any(|m| family.contains(m))
        {
            return FontFace::Mono;
        }
        if family.contains("sans") {
            return FontFace::Sans;
        }
        if ["times", "georgia", "serif", "garamond", "cambria", "book"]
            .iter()
            .any(|m| family.contains(m))
        {
            return FontFace::Serif;
        }
        FontFace::Sans
    }

    /// Average advance of a glyph as a fraction of the point size.
    fn average_advance(self) -> f32 {
        match self {
            FontFace::Sans => 0.52,
            FontFace::Serif => 0.47,
            FontFace::Mono => 0.60,
        }
    }
}

/// One of `F1`..`F12` in the page resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId {
    pub face: FontFace,
    pub bold: bool,
    pub italic: bool,
}

pub const FONT_COUNT: usize = 12;

impl FontId {
    pub fn for_format(format: &CharFormat) -> Self {
        Self {
            face: FontFace::for_family(&format.family),
            bold: format.is_bold(),
            italic: format.italic,
        }
    }

    pub fn index(self) -> usize {
        let face = match self.face {
            FontFace::Sans => 0,
            FontFace::Serif => 1,
            FontFace::Mono => 2,
        };
        face * 4 + usize::from(self.bold) + 2 * usize::from(self.italic)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= FONT_COUNT {
            return None;
        }
        let face = match index / 4 {
            0 => FontFace::Sans,
            1 => FontFace::Serif,
            _ => FontFace::Mono,
        };
        Some(Self {
            face,
            bold: index % 2 == 1,
            italic: (index % 4) >= 2,
        })
    }

    pub fn resource_name(self) -> String {
        format!("F{}", self.index() + 1)
    }

    pub fn base_font(self) -> &'static str {
        match (self.face, self.bold, self.italic) {
            (FontFace::Sans, false, false) => "Helvetica",
            (FontFace::Sans, true, false) => "Helvetica-Bold",
            (FontFace::Sans, false, true) => "Helvetica-Oblique",
            (FontFace::Sans, true, true) => "Helvetica-BoldOblique",
            (FontFace::Serif, false, false) => "Times-Roman",
            (FontFace::Serif, true, false) => "Times-Bold",
            (FontFace::Serif, false, true) => "Times-Italic",
            (FontFace::Serif, true, true) => "Times-BoldItalic",
            (FontFace::Mono, false, false) => "Courier",
            (FontFace::Mono, true, false) => "Courier-Bold",
            (FontFace::Mono, false, true) => "Courier-Oblique",
            (FontFace::Mono, true, true) => "Courier-BoldOblique",
        }
    }

    /// Estimated width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let mut advance = self.face.average_advance();
        if self.bold && self.face != FontFace::Mono {
            advance += 0.04;
        }
        text.chars().count() as f32 * advance * size
    }
}

/// Maps to the single-byte encoding of the standard fonts. Anything outside Latin-1 becomes `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            0x20..=0x7E | 0xA0..=0xFF => ch as u8,
            0x09 => b' ',
            _ => b'?',
        })
        .collect()
}
