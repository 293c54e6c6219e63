//! In-memory implementation of RawConfigStorage
//!
//! This implementation is primarily intended for testing and development purposes.

use crate::{validate_key, ContentStoreError, ContentStoreResult, RawConfigStorage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of RawConfigStorage
///
/// All data is lost when the last clone of the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRawConfigStore {
    documents: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRawConfigStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a single document
    pub fn with_document(key: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let mut documents = HashMap::new();
        documents.insert(key.into(), content.into());
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }
}

#[async_trait]
impl RawConfigStorage for InMemoryRawConfigStore {
    async fn get_raw_config(&self, key: &str) -> ContentStoreResult<Vec<u8>> {
        validate_key(key)?;
        let store = self.documents.read().await;

        match store.get(key) {
            Some(content) => Ok(content.clone()),
            None => Err(ContentStoreError::NotFound(key.to_string())),
        }
    }

    async fn save_raw_config(&self, key: &str, content: &[u8]) -> ContentStoreResult<()> {
        validate_key(key)?;
        let mut store = self.documents.write().await;
        store.insert(key.to_string(), content.to_vec());
        Ok(())
    }

    async fn raw_config_exists(&self, key: &str) -> ContentStoreResult<bool> {
        validate_key(key)?;
        let store = self.documents.read().await;
        Ok(store.contains_key(key))
    }
}
