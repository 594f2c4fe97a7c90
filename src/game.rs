// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Game encapsulates Model and Render and implements the main loop.
//! Be aware that the Game, Model and Render instances share one lifetime.
//!
//! # Example
//!
//! ```ignore
//! let ctx = Context::new("font_viewer", Box::new(WinitWgpuAdapter::new()));
//! let mut g = Game::new(ViewerModel::new(&cfg)?, ViewerRender::new(), ctx);
//! g.init()?;
//! g.run()?;
//! ```

use crate::{context::Context, error::Result};
use log::info;
use std::time::{Duration, Instant};

/// The Model interface, main entrance for data and core logic
pub trait Model {
    fn init(&mut self, ctx: &mut Context) -> Result<()>;
    fn update(&mut self, ctx: &mut Context, dt: f32) {
        self.handle_auto(ctx, dt);
        self.handle_input(ctx, dt);
    }
    /// Work done every frame before input is looked at
    fn handle_auto(&mut self, ctx: &mut Context, dt: f32);
    /// Consumes `ctx.input_events`
    fn handle_input(&mut self, ctx: &mut Context, dt: f32);
}

/// The Render interface, takes context and model as input params. It renders every single frame
pub trait Render {
    type Model: Model;

    fn init(&mut self, ctx: &mut Context, m: &mut Self::Model) -> Result<()>;
    fn update(&mut self, ctx: &mut Context, m: &mut Self::Model, dt: f32) {
        self.draw(ctx, m, dt);
    }
    fn draw(&mut self, ctx: &mut Context, model: &mut Self::Model, dt: f32);
}

/// Game encapsulates a Model, a Render and a Context structure
pub struct Game<M, R>
where
    M: Model,
    R: Render<Model = M>,
{
    pub context: Context,
    pub model: M,
    pub render: R,
    /// Sleep between two polls
    pub frame: Duration,
}

impl<M, R> Game<M, R>
where
    M: Model,
    R: Render<Model = M>,
{
    pub fn new(m: M, r: R, ctx: Context) -> Self {
        info!("{} start...", ctx.name);
        Self {
            context: ctx,
            model: m,
            render: r,
            frame: Duration::from_millis(crate::VIEWER_FRAME_MS),
        }
    }

    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Main loop: one poll of input events, then one tick, until the
    /// adapter reports exit or the model asks to quit.
    pub fn run(&mut self) -> Result<()> {
        info!("Begin run...");
        let mut last_tick = Instant::now();
        loop {
            if self
                .context
                .adapter
                .poll_event(self.frame, &mut self.context.input_events)
            {
                info!("adapter requested exit");
                return Ok(());
            }
            let et = last_tick.elapsed();
            last_tick = Instant::now();
            self.on_tick(et.as_secs_f32());
            if self.context.quit {
                info!("quit");
                return Ok(());
            }
        }
    }

    /// calls every frame, updates model logic and does rendering
    pub fn on_tick(&mut self, dt: f32) {
        self.context.stage += 1;
        self.model.update(&mut self.context, dt);
        self.render.update(&mut self.context, &mut self.model, dt);
    }

    /// init model and render
    pub fn init(&mut self) -> Result<()> {
        info!("Init game...");
        self.model.init(&mut self.context)?;
        self.render.init(&mut self.context, &mut self.model)
    }
}
