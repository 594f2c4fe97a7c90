// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Render Adapter Module
//!
//! An adapter owns the output device: it opens the window, turns backend
//! input into unified [`Event`]s and shows finished canvases.
//!
//! ## Adapters
//! - `winit_wgpu_adapter`: winit window, canvas drawn as a wgpu texture
//! - `headless_adapter`: no window, replays scripted events and keeps the
//!   last frame in memory

use crate::error::Result;
use crate::event::Event;
use crate::render::canvas::Canvas;
use std::any::Any;
use std::time::Duration;

pub mod headless_adapter;
#[cfg(wgpu_backend)]
pub mod winit_wgpu_adapter;

pub use headless_adapter::HeadlessAdapter;
#[cfg(wgpu_backend)]
pub use winit_wgpu_adapter::WinitWgpuAdapter;

/// Used until the real monitor size is known.
pub const DEFAULT_MONITOR_SIZE: (u32, u32) = (1280, 800);

/// State every adapter shares.
#[derive(Debug, Clone)]
pub struct AdapterBase {
    pub title: String,
    /// Drawable size in pixels
    pub pixel_w: u32,
    pub pixel_h: u32,
    /// Size of the monitor the window lives on
    pub monitor_w: u32,
    pub monitor_h: u32,
}

impl AdapterBase {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            pixel_w: 0,
            pixel_h: 0,
            monitor_w: DEFAULT_MONITOR_SIZE.0,
            monitor_h: DEFAULT_MONITOR_SIZE.1,
        }
    }
}

impl Default for AdapterBase {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Adapter {
    /// Opens the output with a drawable area of `w` x `h` pixels.
    fn init(&mut self, w: u32, h: u32, title: &str) -> Result<()>;

    fn get_base(&mut self) -> &mut AdapterBase;

    /// Collects pending input into `es`, then sleeps `timeout`.
    /// Returns true when the program should exit.
    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool;

    /// Shows `canvas` anchored at the top-left corner, one canvas pixel
    /// per screen pixel.
    fn present(&mut self, canvas: &Canvas) -> Result<()>;

    fn set_title(&mut self, title: &str) {
        self.get_base().title = title.to_string();
    }

    /// Asks for a new drawable size.
    fn resize(&mut self, w: u32, h: u32) {
        let base = self.get_base();
        base.pixel_w = w;
        base.pixel_h = h;
    }

    fn screen_size(&mut self) -> (u32, u32) {
        let base = self.get_base();
        (base.pixel_w, base.pixel_h)
    }

    fn monitor_size(&mut self) -> (u32, u32) {
        let base = self.get_base();
        (base.monitor_w, base.monitor_h)
    }

    fn as_any(&mut self) -> &mut dyn Any;
}
