use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    application::flow_validation::CallFlowValidator,
    domain::call_flow::{CallFlow, CallFlowId, CallFlowStatus},
    domain::events::{CallFlowEvent, CallFlowEventPublisher, TracingEventPublisher},
    domain::repository::CallFlowRepository,
    CallFlowError,
};

/// Service for managing the call flow lifecycle
pub struct CallFlowService {
    /// Repository for call flows
    repository: Arc<dyn CallFlowRepository>,

    /// Name and document validation
    validator: CallFlowValidator,

    /// Receives events after successful mutations
    events: Arc<dyn CallFlowEventPublisher>,

    /// Serializes check-then-write sequences against each other and
    /// against lookups
    guard: RwLock<()>,
}

impl CallFlowService {
    /// Create a service with the default validator and a tracing publisher
    pub fn new(repository: Arc<dyn CallFlowRepository>) -> Self {
        Self {
            repository,
            validator: CallFlowValidator::default(),
            events: Arc::new(TracingEventPublisher),
            guard: RwLock::new(()),
        }
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: CallFlowValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the event publisher
    pub fn with_event_publisher(mut self, events: Arc<dyn CallFlowEventPublisher>) -> Self {
        self.events = events;
        self
    }

    fn validate(&self, call_flow: &CallFlow) -> Result<(), CallFlowError> {
        if let Err(err) = self.validator.validate(call_flow) {
            tracing::warn!(
                name = %call_flow.name,
                error_code = err.error_code(),
                "Call flow rejected by validation"
            );
            return Err(err);
        }
        Ok(())
    }

    /// Create a new call flow.
    ///
    /// The flow must not carry an id. Status defaults to draft.
    pub async fn create(&self, call_flow: CallFlow) -> Result<CallFlow, CallFlowError> {
        if let Some(id) = call_flow.id {
            return Err(CallFlowError::InvalidArgument(format!(
                "Cannot create call flow {} that already has id {}",
                call_flow.name, id
            )));
        }
        self.validate(&call_flow)?;

        let saved = {
            let _write = self.guard.write().await;

            if self.repository.find_by_name(&call_flow.name).await?.is_some() {
                tracing::warn!(name = %call_flow.name, "Call flow name already in use");
                return Err(CallFlowError::AlreadyExists(call_flow.name));
            }

            let mut call_flow = call_flow;
            call_flow.status.get_or_insert(CallFlowStatus::Draft);

            self.repository.save(&call_flow).await?
        };
        let id = persisted_id(&saved)?;

        tracing::info!(call_flow_id = %id, name = %saved.name, "Call flow created");
        self.events
            .publish(CallFlowEvent::created(id, saved.name.clone()))
            .await;

        Ok(saved)
    }

    /// Update an existing call flow, possibly renaming it.
    ///
    /// Name uniqueness is checked before the id is resolved, so a rename to
    /// a taken name reports `AlreadyExists` even when the id is unknown.
    pub async fn update(&self, call_flow: CallFlow) -> Result<CallFlow, CallFlowError> {
        self.validate(&call_flow)?;

        let saved = {
            let _write = self.guard.write().await;

            let existing = match self.repository.find_by_name(&call_flow.name).await? {
                Some(holder) if holder.id.is_some() && holder.id == call_flow.id => holder,
                Some(_) => {
                    tracing::warn!(
                        call_flow_id = ?call_flow.id,
                        name = %call_flow.name,
                        "Rename target already in use"
                    );
                    return Err(CallFlowError::AlreadyExists(call_flow.name));
                }
                None => self.require_existing(call_flow.id).await?,
            };

            let mut call_flow = call_flow;
            if call_flow.status.is_none() {
                call_flow.status = existing.status;
            }

            self.repository.save(&call_flow).await?
        };
        let id = persisted_id(&saved)?;

        tracing::info!(call_flow_id = %id, name = %saved.name, "Call flow updated");
        self.events
            .publish(CallFlowEvent::updated(id, saved.name.clone()))
            .await;

        Ok(saved)
    }

    async fn require_existing(&self, id: Option<CallFlowId>) -> Result<CallFlow, CallFlowError> {
        let id = id.ok_or_else(|| {
            CallFlowError::InvalidArgument("Call flow to update has no id".to_string())
        })?;

        match self.repository.find_by_id(&id).await? {
            Some(existing) => Ok(existing),
            None => {
                tracing::warn!(call_flow_id = %id, "Call flow to update does not exist");
                Err(CallFlowError::InvalidArgument(format!(
                    "Call flow with id {} does not exist",
                    id
                )))
            }
        }
    }

    /// Create the flow when it has no id, update it otherwise
    pub async fn save_call_flow(&self, call_flow: CallFlow) -> Result<CallFlow, CallFlowError> {
        match call_flow.id {
            None => self.create(call_flow).await,
            Some(_) => self.update(call_flow).await,
        }
    }

    /// Find a non-retired call flow by exact name
    pub async fn find_by_name(&self, name: &str) -> Result<CallFlow, CallFlowError> {
        let _read = self.guard.read().await;

        tracing::debug!(name = %name, "Looking up call flow by name");
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CallFlowError::InvalidArgument(format!("No call flow named {}", name)))
    }

    /// Non-retired call flows whose name starts with `prefix`
    pub async fn find_all_by_name_prefix(&self, prefix: &str) -> Result<Vec<CallFlow>, CallFlowError> {
        let _read = self.guard.read().await;

        let flows = self.repository.find_all_by_name_prefix(prefix).await?;
        tracing::debug!(prefix = %prefix, matches = flows.len(), "Prefix search");
        Ok(flows)
    }

    /// Permanently remove a call flow
    pub async fn delete(&self, id: CallFlowId) -> Result<(), CallFlowError> {
        let removed = {
            let _write = self.guard.write().await;

            let existing = match self.repository.find_by_id(&id).await? {
                Some(existing) => existing,
                None => {
                    tracing::warn!(call_flow_id = %id, "Call flow to delete does not exist");
                    return Err(CallFlowError::InvalidArgument(format!(
                        "Call flow with id {} does not exist",
                        id
                    )));
                }
            };

            self.repository.delete(&id).await?;
            existing
        };

        tracing::info!(call_flow_id = %id, name = %removed.name, "Call flow deleted");
        self.events
            .publish(CallFlowEvent::deleted(id, removed.name))
            .await;

        Ok(())
    }
}

// A repository save must hand back the flow with its id assigned.
fn persisted_id(saved: &CallFlow) -> Result<CallFlowId, CallFlowError> {
    saved.id.ok_or_else(|| {
        CallFlowError::StorageFailure(format!("Saved call flow {} has no id", saved.name))
    })
}

impl std::fmt::Debug for CallFlowService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallFlowService")
            .field("validator", &self.validator)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
