// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Viewer
//!
//! The font viewer app, built as a [`Model`](crate::game::Model) and a
//! [`Render`](crate::game::Render) driven by [`Game`].
//!
//! - `model`: font, text blocks, point size, colors and key commands
//! - `render`: text surface drawing and presentation

pub mod model;
pub mod render;

pub use model::ViewerModel;
pub use render::ViewerRender;

use crate::config::ViewerConfig;
use crate::context::Context;
use crate::error::Result;
use crate::game::Game;
use crate::render::adapter::{HeadlessAdapter, DEFAULT_MONITOR_SIZE};
use crate::text::TextBlockId;
use log::info;
use std::path::PathBuf;

pub const APP_NAME: &str = "font_viewer";

/// Opens a window and runs until quit.
#[cfg(wgpu_backend)]
pub fn run_window(cfg: &ViewerConfig) -> Result<()> {
    use crate::render::adapter::WinitWgpuAdapter;

    let ctx = Context::new(APP_NAME, Box::new(WinitWgpuAdapter::new()));
    let mut g = Game::new(ViewerModel::new(cfg)?, ViewerRender::new(), ctx)
        .with_frame(cfg.frame_sleep());
    g.init()?;
    g.run()
}

/// Saves every text block at the configured point size, no window.
pub fn run_headless(cfg: &ViewerConfig) -> Result<Vec<PathBuf>> {
    let ctx = Context::new(APP_NAME, Box::new(HeadlessAdapter::new(DEFAULT_MONITOR_SIZE)));
    let mut g = Game::new(ViewerModel::new(cfg)?, ViewerRender::new(), ctx);
    g.init()?;
    let mut saved = vec![];
    for block in TextBlockId::ALL {
        g.model.select_block(block);
        g.on_tick(0.0);
        saved.push(g.model.save()?);
    }
    info!("saved {} bitmaps to {}", saved.len(), g.model.output_dir().display());
    Ok(saved)
}
