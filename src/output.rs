// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Saved bitmaps.

use crate::error::Result;
use crate::render::canvas::Canvas;
use crate::text::TextBlockId;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// `{font}-{size:02}-{block}.png`
pub fn bitmap_filename(font: &str, point_size: u32, block: TextBlockId) -> String {
    format!("{}-{:02}-{}.png", font, point_size, block)
}

/// Writes `canvas` into `dir`, creating it when missing.
pub fn save_bitmap(
    dir: &Path,
    font: &str,
    point_size: u32,
    block: TextBlockId,
    canvas: &Canvas,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(bitmap_filename(font, point_size, block));
    canvas.save_png(&path)?;
    info!("saved {}", path.display());
    Ok(path)
}

/// Deletes every `.png` below `dir`. Returns how many were removed.
pub fn remove_bitmaps(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            removed += remove_bitmaps(&path)?;
        } else if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        {
            fs::remove_file(&path)?;
            debug!("removed {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}
