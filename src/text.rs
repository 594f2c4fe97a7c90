// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Text module
//!
//! - `codepage`: CP437 / CP850 tables
//! - `layout`: fixed width grid wrapping
//! - `blocks`: the text blocks shown by the viewer
//! - `sizing`: largest point size that fits the screen

pub mod blocks;
pub mod codepage;
pub mod layout;
pub mod sizing;

pub use blocks::{TextBlockId, TextBlocks};
pub use layout::{grid_dimensions, layout_text};
pub use sizing::max_point_size;
