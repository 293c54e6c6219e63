//! Repository traits for call flows
//!
//! External crates can implement [`CallFlowRepository`] to provide
//! different persistence mechanisms.

use async_trait::async_trait;

use super::call_flow::{CallFlow, CallFlowId};
use crate::CallFlowError;

/// Persistence contract for call flows
#[async_trait]
pub trait CallFlowRepository: Send + Sync {
    /// Find the non-retired call flow holding `name`
    async fn find_by_name(&self, name: &str) -> Result<Option<CallFlow>, CallFlowError>;

    /// Non-retired call flows whose name starts with `prefix` (case-sensitive),
    /// in id order
    async fn find_all_by_name_prefix(&self, prefix: &str) -> Result<Vec<CallFlow>, CallFlowError>;

    /// Find a call flow by id, retired or not
    async fn find_by_id(&self, id: &CallFlowId) -> Result<Option<CallFlow>, CallFlowError>;

    /// Insert or update a call flow. An id is assigned on first save;
    /// the stored entity is returned.
    async fn save(&self, call_flow: &CallFlow) -> Result<CallFlow, CallFlowError>;

    /// Remove a call flow
    async fn delete(&self, id: &CallFlowId) -> Result<(), CallFlowError>;
}

/// Memory implementations for testing
#[cfg(feature = "testing")]
pub mod memory {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::RwLock;

    #[derive(Debug, Default)]
    struct State {
        flows: BTreeMap<CallFlowId, CallFlow>,
        // name -> id, non-retired flows only
        names: HashMap<String, CallFlowId>,
        last_id: i64,
    }

    impl State {
        fn unindex(&mut self, id: &CallFlowId) {
            if let Some(previous) = self.flows.get(id) {
                if self.names.get(&previous.name) == Some(id) {
                    self.names.remove(&previous.name);
                }
            }
        }
    }

    /// In-memory implementation of the call flow repository
    #[derive(Debug)]
    pub struct MemoryCallFlowRepository {
        state: std::sync::Arc<RwLock<State>>,
    }

    impl MemoryCallFlowRepository {
        /// Create a new memory call flow repository
        pub fn new() -> Self {
            Self {
                state: std::sync::Arc::new(RwLock::new(State::default())),
            }
        }

        /// Number of stored flows, retired included
        pub fn len(&self) -> usize {
            // The flow map stays consistent across a poisoning panic
            self.state
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .flows
                .len()
        }

        /// Whether the repository holds no flows
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl Default for MemoryCallFlowRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CallFlowRepository for MemoryCallFlowRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<CallFlow>, CallFlowError> {
            let state = self.state.read().map_err(|e| {
                CallFlowError::StorageFailure(format!("Failed to acquire read lock: {}", e))
            })?;

            Ok(state
                .names
                .get(name)
                .and_then(|id| state.flows.get(id))
                .cloned())
        }

        async fn find_all_by_name_prefix(
            &self,
            prefix: &str,
        ) -> Result<Vec<CallFlow>, CallFlowError> {
            let state = self.state.read().map_err(|e| {
                CallFlowError::StorageFailure(format!("Failed to acquire read lock: {}", e))
            })?;

            Ok(state
                .flows
                .values()
                .filter(|flow| !flow.retired && flow.name.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: &CallFlowId) -> Result<Option<CallFlow>, CallFlowError> {
            let state = self.state.read().map_err(|e| {
                CallFlowError::StorageFailure(format!("Failed to acquire read lock: {}", e))
            })?;

            Ok(state.flows.get(id).cloned())
        }

        async fn save(&self, call_flow: &CallFlow) -> Result<CallFlow, CallFlowError> {
            let mut state = self.state.write().map_err(|e| {
                CallFlowError::StorageFailure(format!("Failed to acquire write lock: {}", e))
            })?;

            if !call_flow.retired {
                if let Some(holder) = state.names.get(&call_flow.name) {
                    if Some(*holder) != call_flow.id {
                        return Err(CallFlowError::AlreadyExists(call_flow.name.clone()));
                    }
                }
            }

            let id = match call_flow.id {
                Some(id) => {
                    state.last_id = state.last_id.max(id.0);
                    id
                }
                None => {
                    state.last_id += 1;
                    CallFlowId(state.last_id)
                }
            };

            let mut stored = call_flow.clone();
            stored.id = Some(id);

            state.unindex(&id);
            if !stored.retired {
                state.names.insert(stored.name.clone(), id);
            }
            state.flows.insert(id, stored.clone());

            Ok(stored)
        }

        async fn delete(&self, id: &CallFlowId) -> Result<(), CallFlowError> {
            let mut state = self.state.write().map_err(|e| {
                CallFlowError::StorageFailure(format!("Failed to acquire write lock: {}", e))
            })?;

            state.unindex(id);
            state.flows.remove(id);

            Ok(())
        }
    }

}
