// Contracts the host graph editor provides: node storage, drawing, redraw signal, clock

use crate::color::Rgb;
use serde_json::{Map, Value};
use std::time::Instant;

/// Stable per-node handle assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Host-owned node: its current size and the properties the host persists for it.
#[derive(Debug, Clone)]
pub struct NodeInstance {
    pub id: InstanceId,
    pub size: Size,
    pub properties: Map<String, Value>,
}

impl NodeInstance {
    pub fn new(id: InstanceId, size: Size) -> Self {
        Self {
            id,
            size,
            properties: Map::new(),
        }
    }
}

/// 2D drawing primitives used by the widget. Coordinates are node-local.
pub trait DrawSurface {
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f64);
    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f64);
    fn draw_text(&mut self, text: &str, position: Point, font: &str, color: Rgb);
}

/// Signals back into the host. Called from the poll task, so it must be thread-safe.
pub trait Host: Send + Sync + 'static {
    /// Mark the node dirty so the next frame shows fresh state.
    fn request_redraw(&self, id: InstanceId);
}

/// Monotonic millisecond clock: the only time base for throttling, read on each tick
/// and when a poll completes.
pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> u64;
}

/// `Instant`-based clock counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis().min(u64::MAX as u128) as u64
    }
}
