//! Message channel to the host shell.
//!
//! The orchestration layer never calls the shell synchronously. Outbound
//! intents go through [`IpcChannel::send`], which hands an [`IpcMessage`] to a
//! [`Transport`] and returns immediately. Inbound messages (for example a
//! transition completion) enter through [`IpcChannel::receive`], which runs the
//! handlers registered with [`IpcChannel::on`] and then re-dispatches the
//! message on the attached [`EventDispatcher`] under its channel name.
//!
//! [`IpcChannel::handle`] and [`IpcChannel::dispatch`] pair a channel with a
//! local request/response handler, which is how in-process tests stand in for
//! the shell.
//!
//! Ordering is FIFO per channel only.

mod transport;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
pub use transport::{JsonLinesTransport, RecordingTransport, Transport};

use crate::error::{PanesError, PanesResult};
use crate::events::EventDispatcher;

/// A message exchanged with the host shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// Channel name, e.g. `window.transition`.
    pub channel: String,
    /// Arbitrary JSON payload.
    pub payload: Value,
}

impl IpcMessage {
    #[must_use]
    pub fn new(channel: impl Into<String>, payload: Value) -> Self {
        Self { channel: channel.into(), payload }
    }
}

/// Handle returned by [`IpcChannel::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type ReceiveHandler = Arc<dyn Fn(&Value) + Send + Sync>;
type RequestHandler = Arc<dyn Fn(Value) -> PanesResult<Value> + Send + Sync>;

#[derive(Default)]
struct Handlers {
    receive: HashMap<String, Vec<(HandlerId, ReceiveHandler)>>,
    request: HashMap<String, RequestHandler>,
    next_id: u64,
}

// ============================================================================
// IpcChannel
// ============================================================================

/// Fire-and-forget channel to the host shell.
pub struct IpcChannel {
    transport: Arc<dyn Transport>,
    handlers: Mutex<Handlers>,
    events: Option<Arc<EventDispatcher>>,
}

impl std::fmt::Debug for IpcChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.lock();
        f.debug_struct("IpcChannel")
            .field("receive_channels", &handlers.receive.len())
            .field("request_channels", &handlers.request.len())
            .field("events", &self.events.is_some())
            .finish_non_exhaustive()
    }
}

impl IpcChannel {
    /// Creates a channel over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport, handlers: Mutex::new(Handlers::default()), events: None }
    }

    /// Creates a channel over a fresh [`RecordingTransport`], returning both.
    #[must_use]
    pub fn recording() -> (Self, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        (Self::new(transport.clone()), transport)
    }

    /// Re-dispatches every received message on `events`.
    #[must_use]
    pub fn with_events(mut self, events: Arc<EventDispatcher>) -> Self {
        self.events = Some(events);
        self
    }

    /// Sends a message without waiting for anything.
    ///
    /// Transport failures are logged and swallowed.
    pub fn send(&self, channel: &str, payload: Value) {
        if let Err(error) = self.try_send(channel, payload) {
            tracing::warn!(channel, %error, "ipc send failed");
        }
    }

    /// Sends a message, reporting transport failures.
    ///
    /// # Errors
    ///
    /// Returns whatever the transport reports.
    pub fn try_send(&self, channel: &str, payload: Value) -> PanesResult<()> {
        tracing::debug!(channel, "ipc send");
        self.transport.send(&IpcMessage::new(channel, payload))
    }

    /// Registers a handler for inbound messages on `channel`.
    pub fn on<F>(&self, channel: &str, handler: F) -> HandlerId
    where F: Fn(&Value) + Send + Sync + 'static {
        let mut handlers = self.handlers.lock();
        handlers.next_id += 1;
        let id = HandlerId(handlers.next_id);
        handlers.receive.entry(channel.to_string()).or_default().push((id, Arc::new(handler)));
        id
    }

    /// Removes one inbound handler, or all of them when `id` is `None`.
    ///
    /// Returns `true` if anything was removed.
    pub fn off(&self, channel: &str, id: Option<HandlerId>) -> bool {
        let mut handlers = self.handlers.lock();
        match id {
            None => handlers.receive.remove(channel).is_some(),
            Some(id) => {
                let Some(list) = handlers.receive.get_mut(channel) else {
                    return false;
                };
                let before = list.len();
                list.retain(|(handler_id, _)| *handler_id != id);
                let removed = list.len() != before;
                if list.is_empty() {
                    handlers.receive.remove(channel);
                }
                removed
            }
        }
    }

    /// Number of inbound handlers on `channel`.
    #[must_use]
    pub fn handlers(&self, channel: &str) -> usize {
        self.handlers.lock().receive.get(channel).map_or(0, Vec::len)
    }

    /// Delivers an inbound message.
    ///
    /// Handlers run in registration order, then the message is dispatched on
    /// the attached event bus. Returns the number of `on` handlers invoked.
    pub fn receive(&self, message: IpcMessage) -> usize {
        let handlers: Vec<ReceiveHandler> = self
            .handlers
            .lock()
            .receive
            .get(&message.channel)
            .map(|list| list.iter().map(|(_, handler)| handler.clone()).collect())
            .unwrap_or_default();

        tracing::debug!(channel = %message.channel, handlers = handlers.len(), "ipc receive");
        for handler in &handlers {
            handler(&message.payload);
        }

        if let Some(events) = &self.events {
            events.dispatch(&message.channel, message.payload);
        }
        handlers.len()
    }

    /// Registers the request handler for `channel`, replacing any previous one.
    pub fn handle<F>(&self, channel: &str, handler: F)
    where F: Fn(Value) -> PanesResult<Value> + Send + Sync + 'static {
        self.handlers.lock().request.insert(channel.to_string(), Arc::new(handler));
    }

    /// Invokes the request handler of `channel` and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::Ipc`] if no handler is registered, or the
    /// handler's own error.
    pub fn dispatch(&self, channel: &str, payload: Value) -> PanesResult<Value> {
        let handler = self
            .handlers
            .lock()
            .request
            .get(channel)
            .cloned()
            .ok_or_else(|| PanesError::ipc(format!("no handler for channel '{channel}'")))?;
        handler(payload)
    }
}
