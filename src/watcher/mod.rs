// Watcher state machine: draw the cached readings, then maybe start a poll.
// Redraws never block; the poll runs as a tokio task and writes back on completion.

mod config;
pub mod render;

pub use config::{
    BarOrder, Control, ControlKind, DEFAULT_INTERVAL_SECS, DisplayMode, MIN_INTERVAL_SECS,
    PROP_BAR_ORDER, PROP_DISPLAY_MODE, PROP_INTERVAL, WatcherConfig, apply_control, controls,
};

use crate::fetcher::StatusFetcher;
use crate::host::{Clock, DrawSurface, Host, InstanceId, NodeInstance, Size};
use crate::models::Observation;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::runtime::Handle;

/// Default node size; the height is also the minimum needed for two bars and labels.
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 240.0,
    height: 150.0,
};

/// Mutable observation state of one node.
#[derive(Debug, Clone, Default)]
pub struct WatcherState {
    pub observation: Observation,
    /// Clock time of the last completed poll attempt; `None` until one completes,
    /// so the first tick always polls.
    pub last_update_ms: Option<u64>,
    pub poll_in_flight: bool,
    pub polls_completed: u64,
}

/// Handle to one node's state. Dropping the last handle discards the state; a poll
/// still in flight then completes into nothing.
#[derive(Debug, Clone)]
pub struct WatcherInstance {
    id: InstanceId,
    state: Arc<Mutex<WatcherState>>,
}

impl WatcherInstance {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> WatcherState {
        lock(&self.state).clone()
    }
}

/// What a tick decided about polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// A poll was started by this tick.
    Issued,
    /// An earlier poll has not completed yet.
    InFlight,
    /// The interval since the last completed poll has not elapsed.
    Throttled,
}

// Poisoning is ignored: every writer leaves the state consistent.
fn lock(state: &Mutex<WatcherState>) -> MutexGuard<'_, WatcherState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Shared services for all watcher nodes: status source, host signals, clock, and the
/// runtime polls are spawned on.
pub struct Watcher<F, H> {
    fetcher: Arc<F>,
    host: Arc<H>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
}

impl<F: StatusFetcher, H: Host> Watcher<F, H> {
    pub fn new(runtime: Handle, fetcher: Arc<F>, host: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            host,
            clock,
            runtime,
        }
    }

    /// Set up a freshly created node: default any missing options, make sure the node
    /// is tall enough for both bars, and return its empty state.
    pub fn initialize(&self, node: &mut NodeInstance) -> WatcherInstance {
        WatcherConfig::ensure_defaults(&mut node.properties);
        node.size.height = node.size.height.max(DEFAULT_NODE_SIZE.height);
        tracing::debug!(instance = node.id.0, "watcher node initialized");
        WatcherInstance {
            id: node.id,
            state: Arc::new(Mutex::new(WatcherState::default())),
        }
    }

    /// Per-frame hook: draw both bars from cached state, then start a poll if one is
    /// due and none is outstanding. Elapsed time is read from the same clock that
    /// stamps completed polls.
    pub fn on_redraw_tick(
        &self,
        instance: &WatcherInstance,
        node: &NodeInstance,
        surface: &mut dyn DrawSurface,
    ) -> PollDecision {
        let now_ms = self.clock.now_ms();
        let config = WatcherConfig::from_properties(&node.properties);

        let (observation, polled) = {
            let state = lock(&instance.state);
            (state.observation.clone(), state.polls_completed > 0)
        };
        for bar in render::layout(node.size, &observation, &config, polled).iter() {
            render::draw_bar(surface, node.size.width, bar);
        }

        let decision = {
            let mut state = lock(&instance.state);
            if state.poll_in_flight {
                PollDecision::InFlight
            } else if state
                .last_update_ms
                .is_some_and(|last| now_ms.saturating_sub(last) < config.interval_ms())
            {
                PollDecision::Throttled
            } else {
                state.poll_in_flight = true;
                PollDecision::Issued
            }
        };
        if decision == PollDecision::Issued {
            self.spawn_poll(instance);
        }
        decision
    }

    fn spawn_poll(&self, instance: &WatcherInstance) {
        let id = instance.id;
        let state = Arc::downgrade(&instance.state);
        let fetcher = self.fetcher.clone();
        let host = self.host.clone();
        let clock = self.clock.clone();
        tracing::debug!(instance = id.0, "status poll issued");
        self.runtime.spawn(async move {
            let result = fetcher.fetch_status().await;
            complete_poll(id, &state, result, clock.as_ref(), host.as_ref());
        });
    }
}

fn complete_poll<H: Host>(
    id: InstanceId,
    state: &Weak<Mutex<WatcherState>>,
    result: Result<serde_json::Value, crate::fetcher::FetchError>,
    clock: &dyn Clock,
    host: &H,
) {
    let Some(state) = state.upgrade() else {
        tracing::debug!(instance = id.0, "poll completed after node was removed");
        return;
    };
    let observation = match result {
        Ok(body) => Observation::from_status_json(&body),
        Err(e) => {
            tracing::debug!(instance = id.0, error = %e, "status poll failed");
            Observation::failed(&e.to_string())
        }
    };
    {
        let mut s = lock(&state);
        s.observation = observation;
        s.last_update_ms = Some(clock.now_ms());
        s.poll_in_flight = false;
        s.polls_completed += 1;
    }
    tracing::debug!(instance = id.0, "status poll completed");
    host.request_redraw(id);
}
