// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Context bundles what model and render share every frame: the frame
//! counter, the input events collected since the last tick, the render
//! adapter, and the quit request.

use crate::{event::Event, render::adapter::Adapter};

pub struct Context {
    pub name: String,
    pub stage: u32,
    pub input_events: Vec<Event>,
    pub adapter: Box<dyn Adapter>,
    /// Set by the model to leave the main loop after the current tick
    pub quit: bool,
}

impl Context {
    pub fn new(name: &str, adapter: Box<dyn Adapter>) -> Self {
        Self {
            name: name.to_string(),
            stage: 0,
            input_events: vec![],
            adapter,
            quit: false,
        }
    }
}
