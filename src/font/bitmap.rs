// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Bitmap fonts: a PNG or BMP sheet of 16x16 equally sized cells laid out
//! in CP437 order. Coverage is the cell's luminance times its alpha, and
//! cells are scaled nearest-neighbour so their height equals the point
//! size.

use crate::error::{Result, ViewerError};
use crate::font::{FontKind, GlyphBitmap, GlyphEntry, GlyphSource};
use crate::text::codepage::{codepage_index, CP437};
use image::RgbaImage;
use log::info;
use std::path::Path;

/// Cells per sheet row and column.
pub const SHEET_CELLS: u32 = 16;

pub struct BitmapFont {
    sheet: RgbaImage,
    cell_width: u32,
    cell_height: u32,
}

impl BitmapFont {
    pub fn open(path: &Path) -> Result<Self> {
        let sheet = image::open(path)?.to_rgba8();
        Self::from_sheet(sheet)
    }

    pub fn from_sheet(sheet: RgbaImage) -> Result<Self> {
        let (w, h) = sheet.dimensions();
        if w == 0 || h == 0 || w % SHEET_CELLS != 0 || h % SHEET_CELLS != 0 {
            return Err(ViewerError::FontParse(format!(
                "bitmap sheet {}x{} is not a 16x16 grid of cells",
                w, h
            )));
        }
        let (cell_width, cell_height) = (w / SHEET_CELLS, h / SHEET_CELLS);
        info!("bitmap font cells {}x{}", cell_width, cell_height);
        Ok(Self {
            sheet,
            cell_width,
            cell_height,
        })
    }

    fn coverage_at(&self, x: u32, y: u32) -> u8 {
        let p = self.sheet.get_pixel(x, y).0;
        let luma = (p[0] as u32 * 299 + p[1] as u32 * 587 + p[2] as u32 * 114) / 1000;
        (luma * p[3] as u32 / 255) as u8
    }
}

impl GlyphSource for BitmapFont {
    fn kind(&self) -> FontKind {
        FontKind::Bitmap
    }

    fn glyphs(&self) -> Vec<GlyphEntry> {
        let mut entries: Vec<GlyphEntry> = CP437
            .iter()
            .flatten()
            .filter_map(|&code| {
                char::from_u32(code).map(|ch| GlyphEntry {
                    ch,
                    code,
                    name: None,
                })
            })
            .collect();
        entries.sort_by_key(|g| g.code);
        entries
    }

    fn rasterize(&self, ch: char, point_size: u32) -> Option<GlyphBitmap> {
        if point_size == 0 {
            return None;
        }
        let index = codepage_index(&CP437, ch)? as u32;
        let (cx, cy) = (
            (index % SHEET_CELLS) * self.cell_width,
            (index / SHEET_CELLS) * self.cell_height,
        );
        let height = point_size;
        let width = ((self.cell_width * point_size + self.cell_height / 2) / self.cell_height).max(1);

        let mut cell = GlyphBitmap::new(width, height);
        for y in 0..height {
            let sy = cy + (y * self.cell_height / height).min(self.cell_height - 1);
            for x in 0..width {
                let sx = cx + (x * self.cell_width / width).min(self.cell_width - 1);
                cell.set(x, y, self.coverage_at(sx, sy));
            }
        }
        Some(cell)
    }

    fn line_height(&self, point_size: u32) -> u32 {
        point_size
    }

    fn units_per_em(&self) -> u16 {
        self.cell_height.min(u16::MAX as u32) as u16
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Rgba;

    /// A sheet with `cell` sized cells where 'A' and the full block are
    /// solid white and everything else is transparent.
    pub(crate) fn test_sheet(cell: (u32, u32)) -> RgbaImage {
        let mut sheet = RgbaImage::from_pixel(cell.0 * 16, cell.1 * 16, Rgba([0, 0, 0, 0]));
        for index in [0x41u32, 0xDB] {
            let (ox, oy) = ((index % 16) * cell.0, (index / 16) * cell.1);
            for y in 0..cell.1 {
                for x in 0..cell.0 {
                    sheet.put_pixel(ox + x, oy + y, Rgba([255, 255, 255, 255]));
                }
            }
        }
        sheet
    }

    #[test]
    fn test_rejects_uneven_sheet() {
        let sheet = RgbaImage::new(100, 64);
        assert!(matches!(
            BitmapFont::from_sheet(sheet),
            Err(ViewerError::FontParse(_))
        ));
    }

    #[test]
    fn test_glyph_list_is_cp437() {
        let font = BitmapFont::from_sheet(test_sheet((4, 6))).unwrap();
        let glyphs = font.glyphs();
        assert_eq!(glyphs.len(), 256);
        assert_eq!(glyphs[0].code, 0);
        assert!(glyphs.iter().any(|g| g.ch == '█'));
        assert_eq!((font.cell_width, font.cell_height), (4, 6));
    }

    #[test]
    fn test_scaled_to_point_size() {
        let font = BitmapFont::from_sheet(test_sheet((4, 6))).unwrap();
        let a = font.rasterize('A', 12).unwrap();
        assert_eq!((a.width, a.height), (8, 12));
        assert!(a.coverage.iter().all(|&c| c == 255));

        let b = font.rasterize('B', 12).unwrap();
        assert!(b.is_blank());

        let block = font.rasterize('█', 3).unwrap();
        assert_eq!((block.width, block.height), (2, 3));
        assert!(!block.is_blank());
    }

    #[test]
    fn test_unmapped_char_is_none() {
        let font = BitmapFont::from_sheet(test_sheet((4, 6))).unwrap();
        assert!(font.rasterize('€', 12).is_none());
        assert!(font.rasterize('A', 0).is_none());
        assert_eq!(font.line_height(20), 20);
    }

    #[test]
    fn test_open_png_sheet() {
        let dir = std::env::temp_dir().join(format!("font_viewer_bitmap_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Sheet.png");
        test_sheet((5, 8)).save(&path).unwrap();
        let font = BitmapFont::open(&path).unwrap();
        assert_eq!((font.cell_width, font.cell_height), (5, 8));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
