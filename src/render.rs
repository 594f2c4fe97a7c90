// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! ## Sub-modules
//! - `adapter`: output backends (winit + wgpu window, headless)
//! - `canvas`: RGBA surface text is composed onto
//! - `color`: named colors and random glyph coloring
//! - `text_surface`: draws a text block with a glyph atlas

pub mod adapter;
pub mod canvas;
pub mod color;
pub mod text_surface;

pub use adapter::{Adapter, AdapterBase, HeadlessAdapter};
pub use canvas::Canvas;
pub use color::{assign_colors, ColorCycle, Rgb};
pub use text_surface::render_text_surface;
