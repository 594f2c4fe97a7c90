// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Pre-rendered glyph cells for one point size.

use crate::font::{GlyphBitmap, GlyphSource};
use log::debug;
use std::collections::HashMap;

/// Cell size of a font at a point size, the largest rendered glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontDimensions {
    pub point_size: u32,
    pub width: u32,
    pub height: u32,
}

pub struct GlyphAtlas {
    dims: FontDimensions,
    glyphs: HashMap<char, GlyphBitmap>,
}

impl GlyphAtlas {
    /// Renders every char in `chars` once. Chars the font can not draw are
    /// left out.
    pub fn build(
        font: &dyn GlyphSource,
        point_size: u32,
        chars: impl IntoIterator<Item = char>,
    ) -> Self {
        let mut glyphs = HashMap::new();
        let mut failed = 0;
        for ch in chars {
            if glyphs.contains_key(&ch) {
                continue;
            }
            match font.rasterize(ch, point_size) {
                Some(g) => {
                    glyphs.insert(ch, g);
                }
                None => failed += 1,
            }
        }
        let width = glyphs.values().map(|g| g.width).max().unwrap_or(point_size);
        let height = glyphs
            .values()
            .map(|g| g.height)
            .max()
            .unwrap_or_else(|| font.line_height(point_size));
        debug!(
            "atlas {}pt: {} glyphs, {} skipped, cell {}x{}",
            point_size,
            glyphs.len(),
            failed,
            width,
            height
        );
        Self {
            dims: FontDimensions {
                point_size,
                width,
                height,
            },
            glyphs,
        }
    }

    pub fn get(&self, ch: char) -> Option<&GlyphBitmap> {
        self.glyphs.get(&ch)
    }

    pub fn dimensions(&self) -> FontDimensions {
        self.dims
    }

    pub fn point_size(&self) -> u32 {
        self.dims.point_size
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::bitmap::tests::test_sheet;
    use crate::font::BitmapFont;

    #[test]
    fn test_build_skips_unrenderable() {
        let font = BitmapFont::from_sheet(test_sheet((4, 8))).unwrap();
        let atlas = GlyphAtlas::build(&font, 16, "AAB€ ".chars());
        assert_eq!(atlas.len(), 3);
        assert!(atlas.get('€').is_none());
        assert!(atlas.get('A').is_some());
        assert_eq!(
            atlas.dimensions(),
            FontDimensions {
                point_size: 16,
                width: 8,
                height: 16
            }
        );
    }

    #[test]
    fn test_empty_atlas_falls_back_to_point_size() {
        let font = BitmapFont::from_sheet(test_sheet((4, 8))).unwrap();
        let atlas = GlyphAtlas::build(&font, 10, "€".chars());
        assert!(atlas.is_empty());
        assert_eq!(atlas.dimensions().width, 10);
        assert_eq!(atlas.dimensions().height, 10);
    }
}
