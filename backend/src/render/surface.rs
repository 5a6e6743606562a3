//! Rendering surface abstraction.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use super::primitives::DrawCommand;
use crate::models::GeoBounds;

/// A 2-D map canvas. Pixel production is entirely the implementor's concern.
pub trait RenderSurface: Send {
    /// Remove everything drawn so far.
    fn clear(&mut self);

    fn draw(&mut self, command: DrawCommand);

    /// Move the viewport so `bounds` is visible with `padding_px` around it.
    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32);
}

/// What a [`RecordingSurface`] has seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recording {
    /// Commands drawn since the last clear
    pub commands: Vec<DrawCommand>,
    pub clear_count: usize,
    pub last_fit: Option<(GeoBounds, u32)>,
}

/// Surface that records commands in memory. Clones share the recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Recording {
        self.inner.lock().clone()
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.inner.lock().commands.clone()
    }

    pub fn clear_count(&self) -> usize {
        self.inner.lock().clear_count
    }

    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DrawCommand) -> bool,
    {
        self.inner.lock().commands.iter().filter(|c| predicate(c)).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        let mut rec = self.inner.lock();
        rec.commands.clear();
        rec.clear_count += 1;
    }

    fn draw(&mut self, command: DrawCommand) {
        self.inner.lock().commands.push(command);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32) {
        self.inner.lock().last_fit = Some((bounds, padding_px));
    }
}

/// Surface that discards everything, for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear(&mut self) {}

    fn draw(&mut self, _command: DrawCommand) {}

    fn fit_bounds(&mut self, _bounds: GeoBounds, _padding_px: u32) {}
}
