//! Event sink trait for controller notifications.
//!
//! The controller pushes every [`DispatchEvent`] into an [`EventSink`] as it
//! happens and never waits on the sink. The engine binary logs them; tests
//! collect them into a `Vec`.

use blaze_types::DispatchEvent;

/// Receiver of controller events.
pub trait EventSink: Send {
    /// Accept one event. Must not block.
    fn emit(&mut self, event: DispatchEvent);
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn emit(&mut self, _event: DispatchEvent) {}
}

impl EventSink for Vec<DispatchEvent> {
    fn emit(&mut self, event: DispatchEvent) {
        self.push(event);
    }
}
