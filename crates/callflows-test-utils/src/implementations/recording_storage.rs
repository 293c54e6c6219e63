//! Raw config storage that records writes and can be told to fail.

use async_trait::async_trait;
use callflows_content_store::{
    ContentStoreError, ContentStoreResult, InMemoryRawConfigStore, RawConfigStorage,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory storage that keeps a log of every successful write
#[derive(Debug, Clone, Default)]
pub struct RecordingRawConfigStore {
    inner: InMemoryRawConfigStore,
    writes: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    fail_writes: Arc<AtomicBool>,
}

impl RecordingRawConfigStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one document. Seeding is not recorded.
    pub fn with_document(key: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: InMemoryRawConfigStore::with_document(key, content),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every successful write, oldest first
    pub fn writes(&self) -> Vec<(String, Vec<u8>)> {
        self.writes.lock().clone()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }
}

#[async_trait]
impl RawConfigStorage for RecordingRawConfigStore {
    async fn get_raw_config(&self, key: &str) -> ContentStoreResult<Vec<u8>> {
        self.inner.get_raw_config(key).await
    }

    async fn save_raw_config(&self, key: &str, content: &[u8]) -> ContentStoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            tracing::debug!(key = %key, "Simulated storage failure");
            return Err(ContentStoreError::BackendError(anyhow::anyhow!(
                "simulated write failure for {}",
                key
            )));
        }
        self.inner.save_raw_config(key, content).await?;
        self.writes.lock().push((key.to_string(), content.to_vec()));
        Ok(())
    }

    async fn raw_config_exists(&self, key: &str) -> ContentStoreResult<bool> {
        self.inner.raw_config_exists(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_writes_and_simulates_failure() {
        let store = RecordingRawConfigStore::with_document("settings.json", b"{}".to_vec());
        assert_eq!(store.write_count(), 0);

        store.save_raw_config("settings.json", b"[1]").await.unwrap();
        assert_eq!(store.writes(), vec![("settings.json".to_string(), b"[1]".to_vec())]);

        store.set_fail_writes(true);
        assert!(store.save_raw_config("settings.json", b"[2]").await.is_err());
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get_raw_config("settings.json").await.unwrap(), b"[1]".to_vec());
    }
}
