// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! RGBA drawing surface the viewer composes text onto.

use crate::error::Result;
use crate::font::GlyphBitmap;
use crate::render::color::Rgb;
use image::RgbaImage;
use std::path::Path;

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.to_rgba()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn fill(&mut self, color: Rgb) {
        let px = color.to_rgba();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let p = self.image.get_pixel(x, y).0;
        Rgb(p[0], p[1], p[2])
    }

    /// Blends `fg` over the canvas using the glyph coverage as alpha.
    /// Parts falling outside the canvas are clipped.
    pub fn blit_glyph(&mut self, glyph: &GlyphBitmap, x: i64, y: i64, fg: Rgb) {
        let (w, h) = (self.width() as i64, self.height() as i64);
        for gy in 0..glyph.height {
            let py = y + gy as i64;
            if py < 0 || py >= h {
                continue;
            }
            for gx in 0..glyph.width {
                let px = x + gx as i64;
                if px < 0 || px >= w {
                    continue;
                }
                let a = glyph.get(gx, gy) as u32;
                if a == 0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(px as u32, py as u32);
                let blend = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
                dst.0 = [
                    blend(dst.0[0], fg.0),
                    blend(dst.0[1], fg.1),
                    blend(dst.0[2], fg.2),
                    255,
                ];
            }
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, a: u8) -> GlyphBitmap {
        GlyphBitmap {
            width: w,
            height: h,
            coverage: vec![a; (w * h) as usize],
        }
    }

    #[test]
    fn test_blit_blends_and_clips() {
        let mut canvas = Canvas::new(4, 4, Rgb::BLACK);
        canvas.blit_glyph(&solid(2, 2, 255), 3, 3, Rgb::WHITE);
        assert_eq!(canvas.pixel(3, 3), Rgb::WHITE);
        assert_eq!(canvas.pixel(2, 2), Rgb::BLACK);

        canvas.blit_glyph(&solid(2, 2, 128), -1, -1, Rgb(200, 100, 0));
        assert_eq!(canvas.pixel(0, 0), Rgb(100, 50, 0));
        assert_eq!(canvas.pixel(1, 1), Rgb::BLACK);
    }

    #[test]
    fn test_fill_and_raw() {
        let mut canvas = Canvas::new(3, 2, Rgb::BLACK);
        canvas.fill(Rgb(1, 2, 3));
        assert_eq!(canvas.as_raw().len(), 3 * 2 * 4);
        assert_eq!(&canvas.as_raw()[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_save_png() {
        let dir = std::env::temp_dir().join(format!("font_viewer_canvas_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("c.png");
        Canvas::new(5, 7, Rgb::WHITE).save_png(&path).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (5, 7));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
