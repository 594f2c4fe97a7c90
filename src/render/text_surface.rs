// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Draws a laid-out text block into a canvas.

use crate::font::GlyphAtlas;
use crate::render::{canvas::Canvas, color::Rgb};
use crate::text::grid_dimensions;
use std::collections::HashMap;

/// Rows overlap by this many pixels.
pub const ROW_OVERLAP: u32 = 1;

/// Canvas size for `text` drawn with `atlas`, never smaller than 1x1 so an
/// empty block still makes a valid image.
pub fn surface_size(text: &str, atlas: &GlyphAtlas) -> (u32, u32) {
    let (cols, rows) = grid_dimensions(text);
    let dims = atlas.dimensions();
    let row_height = dims.height.saturating_sub(ROW_OVERLAP).max(1);
    ((cols * dims.width).max(1), (rows * row_height).max(1))
}

/// Renders `text` white on black, or with the per character `colors`
/// when given (characters without a color are drawn black).
pub fn render_text_surface(
    text: &str,
    atlas: &GlyphAtlas,
    colors: Option<&HashMap<char, Rgb>>,
) -> Canvas {
    let (width, height) = surface_size(text, atlas);
    let mut canvas = Canvas::new(width, height, Rgb::BLACK);
    let dims = atlas.dimensions();
    let row_height = dims.height.saturating_sub(ROW_OVERLAP).max(1);

    for (row, line) in text.lines().enumerate() {
        let y = (row as u32 * row_height) as i64;
        let mut x = 0i64;
        for ch in line.chars() {
            let ch = match ch {
                '\t' | '\r' => ' ',
                c => c,
            };
            let Some(glyph) = atlas.get(ch) else {
                continue;
            };
            let color = match colors {
                Some(map) => map.get(&ch).copied().unwrap_or(Rgb::BLACK),
                None => Rgb::WHITE,
            };
            canvas.blit_glyph(glyph, x, y, color);
            x += match glyph.width {
                0 => dims.point_size as i64,
                w => w as i64,
            };
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::bitmap::tests::test_sheet;
    use crate::font::BitmapFont;

    fn atlas(text: &str) -> GlyphAtlas {
        let font = BitmapFont::from_sheet(test_sheet((4, 8))).unwrap();
        GlyphAtlas::build(&font, 8, text.chars())
    }

    #[test]
    fn test_surface_size() {
        let text = "AB\nA\nAAA";
        let atlas = atlas(text);
        // cells are 4x8, rows overlap by one pixel
        assert_eq!(surface_size(text, &atlas), (12, 21));
        let canvas = render_text_surface(text, &atlas, None);
        assert_eq!((canvas.width(), canvas.height()), (12, 21));
    }

    #[test]
    fn test_empty_block_is_one_pixel_wide() {
        let atlas = atlas("A");
        assert_eq!(surface_size("", &atlas), (1, 7));
        let canvas = render_text_surface("", &atlas, None);
        assert_eq!((canvas.width(), canvas.height()), (1, 7));
        assert_eq!(canvas.pixel(0, 0), Rgb::BLACK);
    }

    #[test]
    fn test_glyphs_drawn_in_white() {
        let text = "A B";
        let canvas = render_text_surface(text, &atlas(text), None);
        assert_eq!(canvas.pixel(1, 1), Rgb::WHITE);
        // 'B' is blank in the test sheet, the space too
        assert_eq!(canvas.pixel(5, 1), Rgb::BLACK);
        assert_eq!(canvas.pixel(9, 1), Rgb::BLACK);
    }

    #[test]
    fn test_missing_glyph_does_not_advance() {
        // '€' is not in the atlas, so the second 'A' lands in cell 1
        let text = "A€A";
        let canvas = render_text_surface(text, &atlas(text), None);
        assert_eq!(canvas.pixel(5, 1), Rgb::WHITE);
    }

    #[test]
    fn test_colors_and_tabs() {
        let text = "\tA";
        let atlas = atlas("A ");
        let mut colors = HashMap::new();
        colors.insert('A', Rgb(10, 20, 30));
        let canvas = render_text_surface(text, &atlas, Some(&colors));
        // the tab is drawn as a space, 'A' starts in the second cell
        assert_eq!(canvas.pixel(0, 0), Rgb::BLACK);
        assert_eq!(canvas.pixel(4, 0), Rgb(10, 20, 30));

        colors.clear();
        let canvas = render_text_surface(text, &atlas, Some(&colors));
        assert_eq!(canvas.pixel(4, 0), Rgb::BLACK);
    }
}
