// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use crate::config::ViewerConfig;
use crate::context::Context;
use crate::error::Result;
use crate::event::Event;
use crate::font::{display_name, find_font, load_font, GlyphAtlas, GlyphEntry, GlyphSource};
use crate::game::Model;
use crate::keymap::{dispatch, Command};
use crate::output::{remove_bitmaps, save_bitmap};
use crate::render::{
    assign_colors,
    canvas::Canvas,
    color::{ColorCycle, Rgb},
    render_text_surface,
};
use crate::text::{max_point_size, TextBlockId, TextBlocks};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Block shown right after start when the config names none.
pub const START_BLOCK: TextBlockId = TextBlockId::Glyphs;

pub struct ViewerModel {
    pub font_path: PathBuf,
    /// File stem, used in titles and file names
    pub font_name: String,
    font: Box<dyn GlyphSource>,
    pub glyphs: Vec<GlyphEntry>,
    pub atlas: GlyphAtlas,
    pub blocks: TextBlocks,
    pub block: TextBlockId,
    pub point_size: u32,
    /// Largest size the current block fits at, refreshed every tick
    pub max_point_size: u32,
    point_size_cap: u32,
    pub colors: Option<HashMap<char, Rgb>>,
    color_cycle: ColorCycle,
    /// Current window size in pixels
    pub resolution: (u32, u32),
    pub dirty: bool,
    pub output_dir: PathBuf,
    pub last_saved: Option<PathBuf>,
}

/// Every char the atlas needs: the font's glyphs plus whatever the blocks
/// contain. Space is always included, tabs are drawn with it.
fn atlas_chars<'a>(
    glyphs: &'a [GlyphEntry],
    blocks: &'a TextBlocks,
) -> impl Iterator<Item = char> + 'a {
    glyphs
        .iter()
        .filter(|g| g.code != 0)
        .map(|g| g.ch)
        .chain(blocks.iter().flat_map(|(_, text)| text.chars()))
        .chain(std::iter::once(' '))
        .filter(|&c| c != '\n')
}

fn named_glyphs(glyphs: &[GlyphEntry]) -> usize {
    glyphs.iter().filter(|g| g.name.is_some()).count()
}

impl ViewerModel {
    /// Looks the font up and loads it.
    pub fn new(cfg: &ViewerConfig) -> Result<Self> {
        let path = find_font(&cfg.font, &cfg.font_dirs)?;
        Self::open(path, cfg)
    }

    pub fn open(font_path: PathBuf, cfg: &ViewerConfig) -> Result<Self> {
        let font = load_font(&font_path)?;
        let glyphs = font.glyphs();
        let blocks = TextBlocks::build(&glyphs);
        let point_size = cfg.point_size;
        let atlas = GlyphAtlas::build(font.as_ref(), point_size, atlas_chars(&glyphs, &blocks));
        info!(
            "{:?} font {} with {} glyphs ({} named), {}pt",
            font.kind(),
            font_path.display(),
            glyphs.len(),
            named_glyphs(&glyphs),
            point_size
        );
        Ok(Self {
            font_name: display_name(&font_path),
            font_path,
            font,
            glyphs,
            atlas,
            blocks,
            block: cfg.start_block().unwrap_or(START_BLOCK),
            point_size,
            max_point_size: cfg.max_point_size,
            point_size_cap: cfg.max_point_size,
            colors: None,
            color_cycle: ColorCycle::new(cfg.seed),
            resolution: (0, 0),
            dirty: true,
            output_dir: cfg.output.clone(),
            last_saved: None,
        })
    }

    pub fn title(&self) -> String {
        format!("{}-point {} {}", self.point_size, self.block, self.font_name)
    }

    pub fn text(&self) -> &str {
        self.blocks.get(self.block)
    }

    /// Window size that shows the current block at full cell height.
    pub fn window_size(&self) -> (u32, u32) {
        let (cols, rows) = self.blocks.dimensions(self.block);
        let dims = self.atlas.dimensions();
        ((cols * dims.width).max(1), (rows * dims.height).max(1))
    }

    pub fn render_surface(&self) -> Canvas {
        render_text_surface(self.text(), &self.atlas, self.colors.as_ref())
    }

    pub fn select_block(&mut self, block: TextBlockId) {
        self.block = block;
        self.dirty = true;
    }

    fn fit_max(&self, resolution: (u32, u32)) -> u32 {
        max_point_size(
            resolution,
            self.blocks.dimensions(self.block),
            self.point_size_cap,
        )
    }

    fn set_point_size(&mut self, point_size: u32) {
        if point_size != self.atlas.point_size() {
            debug!("point size {} -> {}", self.atlas.point_size(), point_size);
            self.atlas = GlyphAtlas::build(
                self.font.as_ref(),
                point_size,
                atlas_chars(&self.glyphs, &self.blocks),
            );
        }
        self.point_size = point_size;
        self.dirty = true;
    }

    fn clamp_to(&mut self, resolution: (u32, u32)) {
        self.max_point_size = self.fit_max(resolution);
        let ps = self.point_size.min(self.max_point_size);
        self.set_point_size(ps);
    }

    fn reload_glyphs(&mut self) -> Result<()> {
        let font = load_font(&self.font_path)?;
        self.glyphs = font.glyphs();
        self.blocks = TextBlocks::build(&self.glyphs);
        self.font = font;
        self.max_point_size = self.fit_max(self.resolution);
        self.point_size = self.point_size.min(self.max_point_size);
        self.atlas = GlyphAtlas::build(
            self.font.as_ref(),
            self.point_size,
            atlas_chars(&self.glyphs, &self.blocks),
        );
        self.dirty = true;
        info!(
            "reloaded {} glyphs ({} named)",
            self.glyphs.len(),
            named_glyphs(&self.glyphs)
        );
        Ok(())
    }

    /// Saves the current block as shown.
    pub fn save(&mut self) -> Result<PathBuf> {
        let canvas = self.render_surface();
        let path = save_bitmap(
            &self.output_dir,
            &self.font_name,
            self.point_size,
            self.block,
            &canvas,
        )?;
        self.last_saved = Some(path.clone());
        Ok(path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn resize(&mut self, ctx: &mut Context, w: u32, h: u32) {
        info!("resize {}x{}", w, h);
        self.resolution = (w, h);
        self.clamp_to((w, h));
        ctx.adapter.resize(w, h);
    }

    pub fn apply(&mut self, cmd: Command, ctx: &mut Context) {
        debug!("command {:?}", cmd);
        match cmd {
            Command::Quit => ctx.quit = true,
            Command::ToggleColors => {
                self.colors = match self.colors {
                    Some(_) => None,
                    None => Some(assign_colors(&self.glyphs, &mut self.color_cycle)),
                };
                self.dirty = true;
            }
            Command::Recolor => {
                if self.colors.is_some() {
                    self.colors = Some(assign_colors(&self.glyphs, &mut self.color_cycle));
                    self.dirty = true;
                }
            }
            Command::ReloadGlyphs => {
                if let Err(e) = self.reload_glyphs() {
                    warn!("reload {} failed: {}", self.font_path.display(), e);
                }
            }
            Command::CycleText => {
                self.clamp_to(self.resolution);
                self.select_block(self.block.next());
            }
            Command::Save => {
                if let Err(e) = self.save() {
                    warn!("save failed: {}", e);
                }
            }
            Command::DeleteSaved => match remove_bitmaps(&self.output_dir) {
                Ok(n) => info!("removed {} bitmaps from {}", n, self.output_dir.display()),
                Err(e) => warn!("remove bitmaps failed: {}", e),
            },
            Command::IncreaseSize => {
                let ps = (self.point_size + 1).min(self.max_point_size);
                self.set_point_size(ps);
            }
            Command::DecreaseSize => {
                let ps = self.point_size.saturating_sub(1).max(1);
                self.set_point_size(ps);
            }
        }
    }
}

impl Model for ViewerModel {
    fn init(&mut self, ctx: &mut Context) -> Result<()> {
        let (w, h) = self.window_size();
        ctx.adapter.init(w, h, &self.title())?;
        self.resolution = (w, h);
        self.dirty = true;
        Ok(())
    }

    fn handle_auto(&mut self, ctx: &mut Context, _dt: f32) {
        let monitor = ctx.adapter.monitor_size();
        self.max_point_size = self.fit_max(monitor);
    }

    fn handle_input(&mut self, ctx: &mut Context, _dt: f32) {
        let events = std::mem::take(&mut ctx.input_events);
        for event in events {
            match event {
                Event::Quit => ctx.quit = true,
                Event::Resize(w, h) => self.resize(ctx, w, h),
                Event::Key(key) => {
                    if let Some(cmd) = dispatch(&key) {
                        self.apply(cmd, ctx);
                    }
                }
            }
            if ctx.quit {
                break;
            }
        }
    }
}
