//! Shared fixtures for the orchestration tests.

use std::sync::Arc;

use panes_lib::events::EventDispatcher;
use panes_lib::ipc::{IpcChannel, RecordingTransport};
use panes_lib::manager::WindowManager;
use panes_lib::window::{Rect, WindowOptions};

/// A manager wired to an in-memory transport and its own event bus.
pub struct Harness {
    pub manager: WindowManager,
    pub transport: Arc<RecordingTransport>,
    pub events: Arc<EventDispatcher>,
    pub ipc: Arc<IpcChannel>,
}

impl Harness {
    pub fn new() -> Self {
        let events = Arc::new(EventDispatcher::new());
        let transport = Arc::new(RecordingTransport::new());
        let ipc = Arc::new(IpcChannel::new(transport.clone()).with_events(events.clone()));
        let manager = WindowManager::new(ipc.clone(), events.clone());
        Self { manager, transport, events, ipc }
    }

    /// Creates one window per `(id, width, height)` and groups them under `group`.
    pub fn with_group(group: &str, windows: &[(&str, f64, f64)]) -> Self {
        let mut harness = Self::new();
        for (id, width, height) in windows {
            harness.manager.create(id, &WindowOptions::sized(*width, *height)).unwrap();
        }
        let mut handle = harness.manager.create_group(group).unwrap();
        for (id, ..) in windows {
            handle.add(id).unwrap();
        }
        drop(handle);
        harness
    }

    pub fn geometry(&self, id: &str) -> Rect { self.manager.get(id).unwrap().geometry() }

    pub fn geometries(&self, ids: &[&str]) -> Vec<Rect> { ids.iter().map(|id| self.geometry(id)).collect() }
}
