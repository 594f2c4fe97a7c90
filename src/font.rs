// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Font module
//!
//! Loads a font file and turns characters into coverage bitmaps.
//!
//! Two kinds of fonts are supported:
//! - outline fonts (TTF/OTF), rasterized with fontdue, metadata read with
//!   ttf-parser
//! - bitmap fonts (PNG/BMP), a 16x16 sheet of glyph cells in CP437 order
//!
//! Every glyph is rendered into a cell sized bitmap: the width is the
//! glyph advance, the height is the font height, and the baseline sits at
//! the ascent. Blitting cells side by side therefore produces a line of
//! text.

use crate::error::{Result, ViewerError};
use log::info;
use std::path::Path;

pub mod atlas;
pub mod bitmap;
pub mod locate;
pub mod outline;

pub use atlas::{FontDimensions, GlyphAtlas};
pub use bitmap::BitmapFont;
pub use locate::find_font;
pub use outline::OutlineFont;

/// One entry of a font's character map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub ch: char,
    pub code: u32,
    /// Glyph name, when the font carries names.
    pub name: Option<String>,
}

/// 8-bit coverage of one rendered glyph cell, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        self.coverage[(y * self.width + x) as usize] = value;
    }

    /// True when no pixel is covered (e.g. a space).
    pub fn is_blank(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Outline,
    Bitmap,
}

impl FontKind {
    pub fn from_path(path: &Path) -> Result<FontKind> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("ttf") | Some("otf") => Ok(FontKind::Outline),
            Some("png") | Some("bmp") => Ok(FontKind::Bitmap),
            _ => Err(ViewerError::UnsupportedFontType(path.to_path_buf())),
        }
    }
}

/// Anything the viewer can draw text with.
pub trait GlyphSource {
    fn kind(&self) -> FontKind;

    /// Every character the font maps, sorted by code point.
    fn glyphs(&self) -> Vec<GlyphEntry>;

    /// Renders one character cell, None when the font can not draw it.
    fn rasterize(&self, ch: char, point_size: u32) -> Option<GlyphBitmap>;

    /// Distance between baselines in pixels.
    fn line_height(&self, point_size: u32) -> u32;

    fn units_per_em(&self) -> u16;
}

/// Loads a TTF/OTF or PNG/BMP font.
pub fn load_font(path: &Path) -> Result<Box<dyn GlyphSource>> {
    let kind = FontKind::from_path(path)?;
    info!("load {:?} font {}", kind, path.display());
    Ok(match kind {
        FontKind::Outline => Box::new(OutlineFont::open(path)?),
        FontKind::Bitmap => Box::new(BitmapFont::open(path)?),
    })
}

/// Font name shown in titles and output filenames: the file stem.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_font_kind_from_path() {
        assert_eq!(FontKind::from_path(Path::new("a/B.ttf")).unwrap(), FontKind::Outline);
        assert_eq!(FontKind::from_path(Path::new("B.OTF")).unwrap(), FontKind::Outline);
        assert_eq!(FontKind::from_path(Path::new("c.png")).unwrap(), FontKind::Bitmap);
        assert_eq!(FontKind::from_path(Path::new("c.bmp")).unwrap(), FontKind::Bitmap);
        match FontKind::from_path(Path::new("font.woff2")) {
            Err(ViewerError::UnsupportedFontType(p)) => assert_eq!(p, PathBuf::from("font.woff2")),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
        assert!(FontKind::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_load_font_rejects_unknown_extension() {
        assert!(matches!(
            load_font(Path::new("whatever.fon")),
            Err(ViewerError::UnsupportedFontType(_))
        ));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/x/y/Deferral-Regular.ttf")), "Deferral-Regular");
    }

    #[test]
    fn test_glyph_bitmap_blank() {
        let mut g = GlyphBitmap::new(3, 2);
        assert!(g.is_blank());
        g.set(2, 1, 200);
        assert_eq!(g.get(2, 1), 200);
        assert!(!g.is_blank());
    }
}
