//! Event publisher that keeps every event for later assertions.

use async_trait::async_trait;
use callflows_core::{CallFlowEvent, CallFlowEventPublisher};
use parking_lot::Mutex;

/// Collects published events in order
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<CallFlowEvent>>,
}

impl RecordingEventPublisher {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far
    pub fn events(&self) -> Vec<CallFlowEvent> {
        self.events.lock().clone()
    }

    /// Event types published so far, e.g. `callflow.created`
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(CallFlowEvent::event_type).collect()
    }
}

#[async_trait]
impl CallFlowEventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: CallFlowEvent) {
        self.events.lock().push(event);
    }
}
