//! Event sink that renders controller events as log lines.
//!
//! Each [`DispatchEvent`] is logged at `info` with its kind and a JSON
//! rendering of the payload, so a JSON log subscriber yields a
//! machine-readable event stream.

use blaze_core::sink::EventSink;
use blaze_types::DispatchEvent;
use tracing::{info, warn};

/// Sink that logs every event and counts them.
#[derive(Debug, Default)]
pub struct LogSink {
    emitted: u64,
}

impl LogSink {
    /// Create a sink with a zero event count.
    pub const fn new() -> Self {
        Self { emitted: 0 }
    }

    /// Number of events received so far.
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: DispatchEvent) {
        self.emitted = self.emitted.saturating_add(1);
        match serde_json::to_string(&event) {
            Ok(payload) => info!(kind = event.kind(), %payload, "Dispatch event"),
            Err(e) => warn!(kind = event.kind(), error = %e, "Failed to serialize event"),
        }
    }
}
