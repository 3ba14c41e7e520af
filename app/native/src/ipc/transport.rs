//! Outbound transports for [`IpcMessage`]s.

use std::io::Write;

use parking_lot::Mutex;

use super::IpcMessage;
use crate::error::{PanesError, PanesResult};

/// Delivers messages to the host shell.
///
/// Implementations must not block on a reply; the channel treats every send
/// as fire-and-forget.
pub trait Transport: Send + Sync {
    /// Hands one message to the host shell.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::Ipc`] or [`PanesError::Io`] when the message could
    /// not be written.
    fn send(&self, message: &IpcMessage) -> PanesResult<()>;
}

// ============================================================================
// RecordingTransport
// ============================================================================

/// In-memory transport that keeps every message it is handed.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    messages: Mutex<Vec<IpcMessage>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Every recorded message, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<IpcMessage> { self.messages.lock().clone() }

    /// Recorded messages on one channel, oldest first.
    #[must_use]
    pub fn messages_on(&self, channel: &str) -> Vec<IpcMessage> {
        self.messages.lock().iter().filter(|m| m.channel == channel).cloned().collect()
    }

    #[must_use]
    pub fn last_message(&self) -> Option<IpcMessage> { self.messages.lock().last().cloned() }

    #[must_use]
    pub fn len(&self) -> usize { self.messages.lock().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.messages.lock().is_empty() }

    pub fn clear(&self) { self.messages.lock().clear(); }
}

impl Transport for RecordingTransport {
    fn send(&self, message: &IpcMessage) -> PanesResult<()> {
        self.messages.lock().push(message.clone());
        Ok(())
    }
}

// ============================================================================
// JsonLinesTransport
// ============================================================================

/// Writes each message as one line of JSON (`{"channel":…,"payload":…}`).
pub struct JsonLinesTransport<W> {
    writer: Mutex<W>,
}

impl<W> std::fmt::Debug for JsonLinesTransport<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesTransport").finish_non_exhaustive()
    }
}

impl<W: Write + Send> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self { Self { writer: Mutex::new(writer) } }

    /// Consumes the transport, returning the writer.
    pub fn into_inner(self) -> W { self.writer.into_inner() }
}

impl JsonLinesTransport<std::io::Stdout> {
    /// Transport writing to the process' standard output.
    #[must_use]
    pub fn stdout() -> Self { Self::new(std::io::stdout()) }
}

impl<W: Write + Send> Transport for JsonLinesTransport<W> {
    fn send(&self, message: &IpcMessage) -> PanesResult<()> {
        let line = serde_json::to_string(message)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        writer.flush().map_err(|e| PanesError::ipc(format!("flush failed: {e}")))
    }
}
