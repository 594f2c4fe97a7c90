// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use crate::context::Context;
use crate::error::Result;
use crate::game::Render;
use crate::render::canvas::Canvas;
use crate::viewer::model::ViewerModel;
use log::warn;

/// Redraws the text surface when the model changed and presents it every
/// frame.
pub struct ViewerRender {
    pub canvas: Option<Canvas>,
    title: String,
}

impl ViewerRender {
    pub fn new() -> Self {
        Self {
            canvas: None,
            title: String::new(),
        }
    }
}

impl Default for ViewerRender {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for ViewerRender {
    type Model = ViewerModel;

    fn init(&mut self, _ctx: &mut Context, model: &mut ViewerModel) -> Result<()> {
        self.title = model.title();
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context, model: &mut ViewerModel, _dt: f32) {
        if model.dirty || self.canvas.is_none() {
            self.canvas = Some(model.render_surface());
            model.dirty = false;
        }
        let title = model.title();
        if title != self.title {
            ctx.adapter.set_title(&title);
            self.title = title;
        }
        if let Some(canvas) = self.canvas.as_ref() {
            if let Err(e) = ctx.adapter.present(canvas) {
                warn!("present failed: {}", e);
            }
        }
    }
}
