// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Adapter without a window. Events come from a script queued up front,
//! one batch per poll, and presented canvases are kept in memory.

use crate::error::Result;
use crate::event::Event;
use crate::render::adapter::{Adapter, AdapterBase};
use crate::render::canvas::Canvas;
use image::RgbaImage;
use log::debug;
use std::any::Any;
use std::collections::VecDeque;
use std::time::Duration;

pub struct HeadlessAdapter {
    pub base: AdapterBase,
    /// Exits once the script has run out
    script: VecDeque<Vec<Event>>,
    last_frame: Option<RgbaImage>,
    pub frames: usize,
}

impl HeadlessAdapter {
    pub fn new(monitor: (u32, u32)) -> Self {
        let mut base = AdapterBase::new();
        base.monitor_w = monitor.0;
        base.monitor_h = monitor.1;
        Self {
            base,
            script: VecDeque::new(),
            last_frame: None,
            frames: 0,
        }
    }

    /// Queues the events delivered by one poll.
    pub fn push_frame(&mut self, events: Vec<Event>) -> &mut Self {
        self.script.push_back(events);
        self
    }

    pub fn last_frame(&self) -> Option<&RgbaImage> {
        self.last_frame.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.base.title
    }
}

impl Adapter for HeadlessAdapter {
    fn init(&mut self, w: u32, h: u32, title: &str) -> Result<()> {
        debug!("headless init {}x{} {:?}", w, h, title);
        self.base.pixel_w = w;
        self.base.pixel_h = h;
        self.base.title = title.to_string();
        Ok(())
    }

    fn get_base(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn poll_event(&mut self, _timeout: Duration, es: &mut Vec<Event>) -> bool {
        match self.script.pop_front() {
            Some(batch) => {
                let quit = batch.contains(&Event::Quit);
                es.extend(batch);
                quit
            }
            None => true,
        }
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.last_frame = Some(canvas.image().clone());
        self.frames += 1;
        Ok(())
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{key, KeyCode, KeyEvent};
    use crate::render::color::Rgb;

    #[test]
    fn test_script_replay() {
        let mut adapter = HeadlessAdapter::new((800, 600));
        adapter
            .push_frame(vec![key('t')])
            .push_frame(vec![Event::Key(KeyEvent::from(KeyCode::Esc)), Event::Quit]);
        adapter.init(10, 20, "title").unwrap();
        assert_eq!(adapter.screen_size(), (10, 20));
        assert_eq!(adapter.monitor_size(), (800, 600));

        let mut es = vec![];
        assert!(!adapter.poll_event(Duration::ZERO, &mut es));
        assert_eq!(es, vec![key('t')]);
        es.clear();
        assert!(adapter.poll_event(Duration::ZERO, &mut es));
        assert_eq!(es.len(), 2);
        assert!(adapter.poll_event(Duration::ZERO, &mut es));
    }

    #[test]
    fn test_present_and_title() {
        let mut adapter = HeadlessAdapter::new((800, 600));
        let mut es = vec![];
        assert!(adapter.poll_event(Duration::ZERO, &mut es));
        assert!(es.is_empty());

        adapter.present(&Canvas::new(3, 4, Rgb::WHITE)).unwrap();
        assert_eq!(adapter.frames, 1);
        assert_eq!(adapter.last_frame().unwrap().dimensions(), (3, 4));
        adapter.set_title("new");
        assert_eq!(adapter.title(), "new");
    }
}
