use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::domain::call_flow::CallFlowId;

/// Event raised after a successful call flow mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFlowEvent {
    /// A call flow was created
    Created {
        /// Id assigned by the repository
        id: CallFlowId,
        /// Name of the flow
        name: String,
        /// When the event occurred
        timestamp: DateTime<Utc>,
    },
    /// A call flow was updated
    Updated {
        /// Id of the flow
        id: CallFlowId,
        /// Name after the update
        name: String,
        /// When the event occurred
        timestamp: DateTime<Utc>,
    },
    /// A call flow was deleted
    Deleted {
        /// Id of the removed flow
        id: CallFlowId,
        /// Name of the removed flow
        name: String,
        /// When the event occurred
        timestamp: DateTime<Utc>,
    },
}

impl CallFlowEvent {
    /// Event for a freshly persisted flow
    pub fn created(id: CallFlowId, name: impl Into<String>) -> Self {
        CallFlowEvent::Created {
            id,
            name: name.into(),
            timestamp: Utc::now(),
        }
    }

    /// Event for an updated flow
    pub fn updated(id: CallFlowId, name: impl Into<String>) -> Self {
        CallFlowEvent::Updated {
            id,
            name: name.into(),
            timestamp: Utc::now(),
        }
    }

    /// Event for a deleted flow
    pub fn deleted(id: CallFlowId, name: impl Into<String>) -> Self {
        CallFlowEvent::Deleted {
            id,
            name: name.into(),
            timestamp: Utc::now(),
        }
    }

    /// Returns the type of the event as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            CallFlowEvent::Created { .. } => "callflow.created",
            CallFlowEvent::Updated { .. } => "callflow.updated",
            CallFlowEvent::Deleted { .. } => "callflow.deleted",
        }
    }

    /// Id of the affected flow
    pub fn call_flow_id(&self) -> CallFlowId {
        match self {
            CallFlowEvent::Created { id, .. }
            | CallFlowEvent::Updated { id, .. }
            | CallFlowEvent::Deleted { id, .. } => *id,
        }
    }

    /// Name of the affected flow
    pub fn name(&self) -> &str {
        match self {
            CallFlowEvent::Created { name, .. }
            | CallFlowEvent::Updated { name, .. }
            | CallFlowEvent::Deleted { name, .. } => name,
        }
    }

    /// Returns the timestamp when the event occurred
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            CallFlowEvent::Created { timestamp, .. }
            | CallFlowEvent::Updated { timestamp, .. }
            | CallFlowEvent::Deleted { timestamp, .. } => *timestamp,
        }
    }
}

/// Receives call flow events. Publishing is fire and forget.
#[async_trait]
pub trait CallFlowEventPublisher: Debug + Send + Sync {
    /// Publish one event
    async fn publish(&self, event: CallFlowEvent);
}

/// Writes every event to the tracing log
#[derive(Debug, Default, Clone)]
pub struct TracingEventPublisher;

#[async_trait]
impl CallFlowEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: CallFlowEvent) {
        tracing::info!(
            event_type = event.event_type(),
            call_flow_id = %event.call_flow_id(),
            name = %event.name(),
            timestamp = %event.timestamp().to_rfc3339(),
            "Call flow event"
        );
    }
}

/// Discards every event
#[derive(Debug, Default, Clone)]
pub struct NoopEventPublisher;

#[async_trait]
impl CallFlowEventPublisher for NoopEventPublisher {
    async fn publish(&self, _event: CallFlowEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let created = CallFlowEvent::created(CallFlowId(3), "MainFlow");
        assert_eq!(created.event_type(), "callflow.created");
        assert_eq!(created.call_flow_id(), CallFlowId(3));
        assert_eq!(created.name(), "MainFlow");

        assert_eq!(CallFlowEvent::updated(CallFlowId(3), "MainFlow").event_type(), "callflow.updated");
        assert_eq!(CallFlowEvent::deleted(CallFlowId(3), "MainFlow").event_type(), "callflow.deleted");
    }

    #[tokio::test]
    async fn test_publishers_accept_events() {
        TracingEventPublisher
            .publish(CallFlowEvent::created(CallFlowId(1), "MainFlow"))
            .await;
        NoopEventPublisher
            .publish(CallFlowEvent::deleted(CallFlowId(1), "MainFlow"))
            .await;
    }
}
