//! Call Flows Content Store
//!
//! Provides abstractions and implementations for raw settings storage.
//! The RawConfigStorage trait defines a contract for storing and retrieving
//! named, opaque documents (for example the provider/renderer settings file).
//! Callers own the format of the bytes; the store only moves them.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur during raw storage operations
#[derive(Error, Debug)]
pub enum ContentStoreError {
    #[error("Storage backend error: {0}")]
    BackendError(#[from] anyhow::Error), // Catch-all for backend-specific issues

    #[error("Raw config not found for key: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RawConfigStorage operations
pub type ContentStoreResult<T> = Result<T, ContentStoreError>;

/// Trait defining the contract for raw config storage implementations
#[async_trait]
pub trait RawConfigStorage: Send + Sync {
    /// Read the whole document stored under `key`
    async fn get_raw_config(&self, key: &str) -> ContentStoreResult<Vec<u8>>;

    /// Replace the document stored under `key` with `content`.
    ///
    /// Implementations must make the replacement all-or-nothing: a
    /// concurrent reader sees either the old or the new document.
    async fn save_raw_config(&self, key: &str, content: &[u8]) -> ContentStoreResult<()>;

    /// Check whether a document exists under `key`
    async fn raw_config_exists(&self, key: &str) -> ContentStoreResult<bool>;
}

/// Reject keys that are empty or could escape a storage namespace
pub fn validate_key(key: &str) -> ContentStoreResult<()> {
    if key.trim().is_empty() {
        return Err(ContentStoreError::InvalidKey("key must not be empty".to_string()));
    }
    if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
        return Err(ContentStoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

pub mod file;
pub mod memory;

pub use file::FileRawConfigStore;
pub use memory::InMemoryRawConfigStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("callflows-settings.json").is_ok());
        assert!(matches!(validate_key(""), Err(ContentStoreError::InvalidKey(_))));
        assert!(matches!(validate_key("   "), Err(ContentStoreError::InvalidKey(_))));
        assert!(matches!(validate_key("../etc/passwd"), Err(ContentStoreError::InvalidKey(_))));
        assert!(matches!(validate_key("a\\b"), Err(ContentStoreError::InvalidKey(_))));
        assert!(matches!(validate_key(".."), Err(ContentStoreError::InvalidKey(_))));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ContentStoreError::NotFound("settings.json".to_string()).to_string(),
            "Raw config not found for key: settings.json"
        );
        assert_eq!(
            ContentStoreError::InvalidKey("a/b".to_string()).to_string(),
            "Invalid storage key: a/b"
        );
    }
}
