// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Named colors and the random per-glyph coloring used by the color mode.

use crate::font::GlyphEntry;
use rand::seq::SliceRandom;
use rand_xoshiro::{rand_core::SeedableRng, Xoshiro256StarStar};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 255])
    }
}

/// Named colors glyphs are painted with. Black is left out, it would
/// vanish on the background.
pub const PALETTE: [(&str, Rgb); 40] = [
    ("aliceblue", Rgb(240, 248, 255)),
    ("aquamarine", Rgb(127, 255, 212)),
    ("bisque", Rgb(255, 228, 196)),
    ("blueviolet", Rgb(138, 43, 226)),
    ("brown", Rgb(165, 42, 42)),
    ("burlywood", Rgb(222, 184, 135)),
    ("cadetblue", Rgb(95, 158, 160)),
    ("chartreuse", Rgb(127, 255, 0)),
    ("chocolate", Rgb(210, 105, 30)),
    ("coral", Rgb(255, 127, 80)),
    ("cornflowerblue", Rgb(100, 149, 237)),
    ("crimson", Rgb(220, 20, 60)),
    ("cyan", Rgb(0, 255, 255)),
    ("darkgoldenrod", Rgb(184, 134, 11)),
    ("darkorange", Rgb(255, 140, 0)),
    ("darkorchid", Rgb(153, 50, 204)),
    ("darkseagreen", Rgb(143, 188, 143)),
    ("deeppink", Rgb(255, 20, 147)),
    ("deepskyblue", Rgb(0, 191, 255)),
    ("dodgerblue", Rgb(30, 144, 255)),
    ("firebrick", Rgb(178, 34, 34)),
    ("forestgreen", Rgb(34, 139, 34)),
    ("gold", Rgb(255, 215, 0)),
    ("goldenrod", Rgb(218, 165, 32)),
    ("greenyellow", Rgb(173, 255, 47)),
    ("hotpink", Rgb(255, 105, 180)),
    ("indianred", Rgb(205, 92, 92)),
    ("khaki", Rgb(240, 230, 140)),
    ("lavender", Rgb(230, 230, 250)),
    ("lightcoral", Rgb(240, 128, 128)),
    ("lightseagreen", Rgb(32, 178, 170)),
    ("limegreen", Rgb(50, 205, 50)),
    ("magenta", Rgb(255, 0, 255)),
    ("mediumpurple", Rgb(147, 112, 219)),
    ("orange", Rgb(255, 165, 0)),
    ("orchid", Rgb(218, 112, 214)),
    ("salmon", Rgb(250, 128, 114)),
    ("springgreen", Rgb(0, 255, 127)),
    ("tomato", Rgb(255, 99, 71)),
    ("yellow", Rgb(255, 255, 0)),
];

/// Endless stream of palette colors. Each round walks the whole palette
/// in a freshly shuffled order.
pub struct ColorCycle {
    rng: Xoshiro256StarStar,
    order: Vec<usize>,
    pos: usize,
}

impl ColorCycle {
    /// Seeds from the clock when no seed is given.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            order: (0..PALETTE.len()).collect(),
            pos: PALETTE.len(),
        }
    }
}

impl Iterator for ColorCycle {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        if self.pos >= self.order.len() {
            self.order.shuffle(&mut self.rng);
            self.pos = 0;
        }
        let color = PALETTE[self.order[self.pos]].1;
        self.pos += 1;
        Some(color)
    }
}

/// A fresh color for every glyph of the font.
pub fn assign_colors(glyphs: &[GlyphEntry], cycle: &mut ColorCycle) -> HashMap<char, Rgb> {
    glyphs.iter().map(|g| g.ch).zip(cycle).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_uses_whole_palette() {
        let mut cycle = ColorCycle::new(Some(7));
        let round: HashSet<Rgb> = cycle.by_ref().take(PALETTE.len()).collect();
        assert_eq!(round.len(), PALETTE.len());
        assert!(!round.contains(&Rgb::BLACK));
        // and it keeps going
        assert!(cycle.next().is_some());
    }

    #[test]
    fn test_seeded_cycles_repeat() {
        let a: Vec<Rgb> = ColorCycle::new(Some(42)).take(100).collect();
        let b: Vec<Rgb> = ColorCycle::new(Some(42)).take(100).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_assign_colors() {
        let glyphs: Vec<GlyphEntry> = "abcd"
            .chars()
            .map(|ch| GlyphEntry {
                ch,
                code: ch as u32,
                name: None,
            })
            .collect();
        let mut cycle = ColorCycle::new(Some(1));
        let colors = assign_colors(&glyphs, &mut cycle);
        assert_eq!(colors.len(), 4);
        assert!(colors.values().all(|c| *c != Rgb::BLACK));
        let again = assign_colors(&glyphs, &mut cycle);
        assert_eq!(again.len(), 4);
    }
}
