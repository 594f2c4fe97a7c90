// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! The text blocks a user can cycle through.

use crate::font::GlyphEntry;
use crate::text::{
    codepage::{codepage_text, CP437, CP850},
    layout::{grid_dimensions, is_blank_char, layout_text},
};
use std::fmt;

/// Shapes that are easy to confuse at small sizes.
pub const TESTER_TEXT: &str = "iIl1L
oO0
s52Zz
<[({})]>
+tT
pqga
mnh";

/// A short piece of code, for judging a font as a programming font.
pub const CODE_TEXT: &str = "fn max_point_size(res: (u32, u32), dims: (u32, u32)) -> u32 {
    let rows = dims.1 + 2;
    (2..=72u32)
        .rev()
        .find(|&ps| dims.0 * ps < res.0 && rows * ps < res.1)
        .unwrap_or(2)
}";

/// Columns used for code page blocks.
pub const CODEPAGE_WIDTH: usize = 16;

/// Columns used for the discovered glyph block.
pub const GLYPHS_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextBlockId {
    Cp437,
    Cp850,
    Glyphs,
    Test,
    Code,
}

impl TextBlockId {
    /// Cycling order.
    pub const ALL: [TextBlockId; 5] = [
        TextBlockId::Cp437,
        TextBlockId::Cp850,
        TextBlockId::Glyphs,
        TextBlockId::Test,
        TextBlockId::Code,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextBlockId::Cp437 => "cp437",
            TextBlockId::Cp850 => "cp850",
            TextBlockId::Glyphs => "glyphs",
            TextBlockId::Test => "test",
            TextBlockId::Code => "code",
        }
    }

    pub fn from_name(name: &str) -> Option<TextBlockId> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// The block after this one, wrapping around after the last.
    pub fn next(self) -> TextBlockId {
        let i = Self::ALL.iter().position(|&b| b == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TextBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All laid-out blocks, in cycling order.
pub struct TextBlocks {
    blocks: Vec<(TextBlockId, String)>,
}

impl TextBlocks {
    pub fn build(glyphs: &[GlyphEntry]) -> Self {
        let glyph_text: String = glyphs
            .iter()
            .filter(|g| g.code != 0)
            .map(|g| if is_blank_char(g.ch) { ' ' } else { g.ch })
            .collect();
        let blocks = TextBlockId::ALL
            .into_iter()
            .map(|id| {
                let text = match id {
                    TextBlockId::Cp437 => {
                        layout_text(&codepage_text(&CP437), Some(CODEPAGE_WIDTH))
                    }
                    TextBlockId::Cp850 => {
                        layout_text(&codepage_text(&CP850), Some(CODEPAGE_WIDTH))
                    }
                    TextBlockId::Glyphs => layout_text(&glyph_text, Some(GLYPHS_WIDTH)),
                    TextBlockId::Test => layout_text(TESTER_TEXT, None),
                    TextBlockId::Code => layout_text(CODE_TEXT, None),
                };
                (id, text)
            })
            .collect();
        Self { blocks }
    }

    pub fn get(&self, id: TextBlockId) -> &str {
        self.blocks
            .iter()
            .find(|(b, _)| *b == id)
            .map_or("", |(_, t)| t.as_str())
    }

    /// (columns, rows) of a block.
    pub fn dimensions(&self, id: TextBlockId) -> (u32, u32) {
        grid_dimensions(self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextBlockId, &str)> {
        self.blocks.iter().map(|(id, t)| (*id, t.as_str()))
    }
}
