//! File-backed implementation of RawConfigStorage
//!
//! Every key maps to one file directly under the base directory.

use crate::{validate_key, ContentStoreError, ContentStoreResult, RawConfigStorage};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Stores each raw document as a file under `base_path`
#[derive(Debug, Clone)]
pub struct FileRawConfigStore {
    base_path: PathBuf,
}

impl FileRawConfigStore {
    /// Create a store rooted at `base_path`. The directory is created lazily
    /// on the first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the documents
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    // Temp files live next to the target so the final rename stays on one filesystem.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl RawConfigStorage for FileRawConfigStore {
    async fn get_raw_config(&self, key: &str) -> ContentStoreResult<Vec<u8>> {
        validate_key(key)?;
        let path = self.document_path(key);

        match fs::read(&path).await {
            Ok(data) => {
                debug!(path = %path.display(), bytes = data.len(), "Read raw config");
                Ok(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ContentStoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(ContentStoreError::Io(e)),
        }
    }

    async fn save_raw_config(&self, key: &str, content: &[u8]) -> ContentStoreResult<()> {
        validate_key(key)?;
        fs::create_dir_all(&self.base_path).await?;

        let temp_path = self.temp_path(key);
        let target_path = self.document_path(key);

        let write_result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(content).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, &target_path).await
        }
        .await;

        if let Err(e) = write_result {
            // Best effort; the temp file is invisible to readers either way.
            let _ = fs::remove_file(&temp_path).await;
            return Err(ContentStoreError::Io(e));
        }

        debug!(path = %target_path.display(), bytes = content.len(), "Saved raw config");
        Ok(())
    }

    async fn raw_config_exists(&self, key: &str) -> ContentStoreResult<bool> {
        validate_key(key)?;
        Ok(fs::try_exists(self.document_path(key)).await?)
    }
}
