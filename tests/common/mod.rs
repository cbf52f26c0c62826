// Shared test helpers: recording surface/host, gated fetcher, manual clock

#![allow(dead_code)]

use serde_json::Value;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Semaphore, mpsc};
use vram_watcher::color::Rgb;
use vram_watcher::fetcher::{FetchError, StatusFetcher};
use vram_watcher::host::{Clock, DrawSurface, Host, InstanceId, NodeInstance, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Stroke(Rect, Rgb, f64),
    Fill(Rect, Rgb, f64),
    Text(String, Point, String, Rgb),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(t, ..) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(Rect, Rgb, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(r, c, a) => Some((*r, *c, *a)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f64) {
        self.ops.push(DrawOp::Stroke(rect, color, line_width));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f64) {
        self.ops.push(DrawOp::Fill(rect, color, alpha));
    }

    fn draw_text(&mut self, text: &str, position: Point, font: &str, color: Rgb) {
        self.ops
            .push(DrawOp::Text(text.to_string(), position, font.to_string(), color));
    }
}

/// Forwards every redraw request to a channel so tests can await poll completion.
pub struct RecordingHost {
    tx: mpsc::UnboundedSender<InstanceId>,
}

impl RecordingHost {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<InstanceId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl Host for RecordingHost {
    fn request_redraw(&self, id: InstanceId) {
        let _ = self.tx.send(id);
    }
}

/// Fetcher whose calls block until the test opens the gate, then return a fixed result.
pub struct GatedFetcher {
    pub calls: AtomicUsize,
    gate: Semaphore,
    response: Mutex<Result<Value, FetchError>>,
}

impl GatedFetcher {
    pub fn new(response: Result<Value, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            response: Mutex::new(response),
        })
    }

    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn set_response(&self, response: Result<Value, FetchError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatusFetcher for GatedFetcher {
    async fn fetch_status(&self) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.acquire().await.expect("gate closed").forget();
        self.response.lock().unwrap().clone()
    }
}

#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start_ms: u64) -> Arc<Self> {
        Arc::new(Self(AtomicU64::new(start_ms)))
    }

    pub fn set(&self, ms: u64) {
        self.0.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn node(id: u64) -> NodeInstance {
    NodeInstance::new(
        InstanceId(id),
        Size {
            width: 240.0,
            height: 150.0,
        },
    )
}

/// Let spawned poll tasks run to completion on the current-thread runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
