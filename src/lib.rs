// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Font viewer: loads a TTF/OTF outline font or a 16x16 bitmap font sheet
//! and shows how it renders.
//!
//! Text blocks (code pages 437 and 850, every glyph of the font, a glyph
//! confusion tester and a code sample) are laid out on a cell grid and
//! drawn into an RGBA canvas. The canvas is shown in a winit window drawn
//! with wgpu, or written straight to PNG in headless mode.
//!
//! The app follows the Model + Render + Game pattern: `viewer::ViewerModel`
//! holds the state and turns key presses into commands,
//! `viewer::ViewerRender` redraws the canvas, and `game::Game` runs the
//! loop over a render adapter.
//!
//! Building with `--no-default-features --features base` leaves out the
//! window and only the headless mode remains.

use ::log::info;

/// sleep between two polls of the window loop in ms, set to a small number to keep keys responsive
pub const VIEWER_FRAME_MS: u64 = 1;

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod font;
pub mod game;
pub mod keymap;
pub mod log;
pub mod output;
pub mod render;
pub mod text;
pub mod viewer;

pub use config::{Args, ViewerConfig};
pub use error::{Result, ViewerError};

/// Entry used by the binary: config, logging, then the window or the
/// headless export.
pub fn run(args: Args) -> Result<()> {
    let cfg = ViewerConfig::from_args(&args)?;
    let level = crate::log::parse_level(&cfg.log_level)?;
    crate::log::init_log(level, &cfg.log_file)?;
    info!("{:?}", cfg);

    if cfg.headless {
        let saved = viewer::run_headless(&cfg)?;
        for path in saved {
            println!("{}", path.display());
        }
        return Ok(());
    }

    #[cfg(wgpu_backend)]
    {
        viewer::run_window(&cfg)
    }

    #[cfg(not(wgpu_backend))]
    {
        ::log::warn!("built without a window backend, exporting bitmaps instead");
        viewer::run_headless(&cfg).map(|_| ())
    }
}
