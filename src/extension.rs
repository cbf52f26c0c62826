// Host registration: one extension object per process, owning per-node watcher state

use crate::fetcher::StatusFetcher;
use crate::host::{Clock, DrawSurface, Host, InstanceId, NodeInstance};
use crate::watcher::{PollDecision, Watcher, WatcherInstance};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Name the extension registers under.
pub const EXTENSION_NAME: &str = "VRAM_watcher";
/// Node type the extension attaches to; other node types are ignored.
pub const NODE_TYPE: &str = "VRAMWatcher";
/// Title shown in the host's node menu.
pub const NODE_DISPLAY_NAME: &str = "VRAM Watcher (Bar)";

/// Lifecycle hooks the host calls for watcher nodes.
pub struct WatcherExtension<F, H> {
    watcher: Watcher<F, H>,
    instances: HashMap<InstanceId, WatcherInstance>,
}

/// Register the extension once at startup. Polls are spawned on `runtime`.
pub fn register<F: StatusFetcher, H: Host>(
    runtime: Handle,
    fetcher: Arc<F>,
    host: Arc<H>,
    clock: Arc<dyn Clock>,
) -> WatcherExtension<F, H> {
    tracing::info!(extension = EXTENSION_NAME, node_type = NODE_TYPE, "registered");
    WatcherExtension {
        watcher: Watcher::new(runtime, fetcher, host, clock),
        instances: HashMap::new(),
    }
}

impl<F: StatusFetcher, H: Host> WatcherExtension<F, H> {
    pub fn name(&self) -> &'static str {
        EXTENSION_NAME
    }

    pub fn handles(&self, node_type: &str) -> bool {
        node_type == NODE_TYPE
    }

    /// Creation hook. Re-creating an existing id replaces its state.
    pub fn node_created(&mut self, node: &mut NodeInstance) {
        let instance = self.watcher.initialize(node);
        self.instances.insert(node.id, instance);
    }

    /// Foreground draw hook. Returns `None` for nodes this extension never initialized.
    pub fn draw_foreground(
        &self,
        node: &NodeInstance,
        surface: &mut dyn DrawSurface,
    ) -> Option<PollDecision> {
        let instance = self.instances.get(&node.id)?;
        Some(self.watcher.on_redraw_tick(instance, node, surface))
    }

    /// Removal hook. An in-flight poll for this node completes as a no-op.
    pub fn node_removed(&mut self, id: InstanceId) {
        self.instances.remove(&id);
    }

    pub fn instance(&self, id: InstanceId) -> Option<&WatcherInstance> {
        self.instances.get(&id)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
