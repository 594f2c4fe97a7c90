// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! TrueType / OpenType fonts.
//!
//! fontdue does the rasterization. The character map and vertical metrics
//! are read once with ttf-parser when the file is opened.

use crate::error::{Result, ViewerError};
use crate::font::{FontKind, GlyphBitmap, GlyphEntry, GlyphSource};
use fontdue::{Font, FontSettings};
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;
use ttf_parser::{cmap, Face, GlyphId};

pub struct OutlineFont {
    font: Font,
    glyphs: Vec<GlyphEntry>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
}

impl OutlineFont {
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let face = Face::parse(&data, 0).map_err(|e| ViewerError::FontParse(e.to_string()))?;
        let glyphs = discover_glyphs(&face);
        let units_per_em = face.units_per_em();
        let (ascender, descender, line_gap) = (face.ascender(), face.descender(), face.line_gap());
        info!(
            "cmap: {} characters, {} glyphs, units_per_em {}",
            glyphs.len(),
            face.number_of_glyphs(),
            units_per_em
        );

        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| ViewerError::FontParse(e.to_string()))?;

        Ok(Self {
            font,
            glyphs,
            units_per_em,
            ascender,
            descender,
            line_gap,
        })
    }

    /// Ascent and descent in pixels at `px`, descent is negative.
    fn vertical_metrics(&self, px: f32) -> (f32, f32) {
        match self.font.horizontal_line_metrics(px) {
            Some(lm) => (lm.ascent, lm.descent),
            None => {
                let scale = px / self.units_per_em.max(1) as f32;
                (self.ascender as f32 * scale, self.descender as f32 * scale)
            }
        }
    }
}

fn discover_glyphs(face: &Face) -> Vec<GlyphEntry> {
    match face.tables().cmap {
        Some(cmap) => cmap_glyphs(&cmap, |gid| face.glyph_name(gid).map(str::to_string)),
        None => {
            debug!("font has no cmap table");
            vec![]
        }
    }
}

/// Walks every cmap subtable, symbol and legacy encodings included, so
/// fonts with only a (3,0) table still list their glyphs. Unicode
/// subtables are read first and a code point keeps its first entry.
fn cmap_glyphs(cmap: &cmap::Table, name: impl Fn(GlyphId) -> Option<String>) -> Vec<GlyphEntry> {
    let mut found: BTreeMap<u32, GlyphEntry> = BTreeMap::new();
    for unicode in [true, false] {
        for subtable in cmap.subtables {
            if subtable.is_unicode() != unicode {
                continue;
            }
            subtable.codepoints(|code| {
                let Some(ch) = char::from_u32(code) else {
                    return;
                };
                found.entry(code).or_insert_with(|| GlyphEntry {
                    ch,
                    code,
                    name: subtable.glyph_index(code).and_then(&name),
                });
            });
        }
    }
    found.into_values().collect()
}

impl GlyphSource for OutlineFont {
    fn kind(&self) -> FontKind {
        FontKind::Outline
    }

    fn glyphs(&self) -> Vec<GlyphEntry> {
        self.glyphs.clone()
    }

    fn rasterize(&self, ch: char, point_size: u32) -> Option<GlyphBitmap> {
        if point_size == 0 {
            return None;
        }
        let px = point_size as f32;
        let (metrics, bitmap) = self.font.rasterize(ch, px);
        let (ascent, descent) = self.vertical_metrics(px);
        let baseline = ascent.ceil() as i32;
        let height = (ascent - descent).ceil().max(1.0) as u32;
        let width = (metrics.advance_width.ceil() as i32)
            .max(metrics.xmin + metrics.width as i32)
            .max(0) as u32;
        if width == 0 {
            return None;
        }

        let mut cell = GlyphBitmap::new(width, height);
        // fontdue offsets are relative to the baseline, y pointing up
        let top = baseline - (metrics.height as i32 + metrics.ymin);
        for (row, line) in bitmap.chunks(metrics.width.max(1)).enumerate() {
            let y = top + row as i32;
            if y < 0 || y >= height as i32 {
                continue;
            }
            for (col, &alpha) in line.iter().enumerate() {
                let x = metrics.xmin + col as i32;
                if x < 0 || x >= width as i32 {
                    continue;
                }
                cell.set(x as u32, y as u32, alpha);
            }
        }
        Some(cell)
    }

    fn line_height(&self, point_size: u32) -> u32 {
        let units = (self.ascender as i32 - self.descender as i32 + self.line_gap as i32) as f32;
        (units / self.units_per_em.max(1) as f32 * point_size as f32) as u32
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}
