use callflows_content_store::{ContentStoreError, RawConfigStorage};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::settings::{Config, Renderer, Settings, SettingsStore},
    CallFlowError,
};

/// Service owning the provider/renderer settings index and the persisted
/// settings document.
///
/// Readers see either the state before a mutation or the state after it;
/// the index is swapped only once the new document has been written.
pub struct ConfigService {
    storage: Arc<dyn RawConfigStorage>,
    key: String,
    store: RwLock<SettingsStore>,
}

impl ConfigService {
    /// Load the settings document stored under `key` and build the index.
    ///
    /// A missing document yields empty settings.
    pub async fn initialize(
        storage: Arc<dyn RawConfigStorage>,
        key: impl Into<String>,
    ) -> Result<Self, CallFlowError> {
        let key = key.into();

        let store = match storage.get_raw_config(&key).await {
            Ok(raw) => SettingsStore::from_raw(&raw)?,
            Err(ContentStoreError::NotFound(_)) => {
                tracing::info!(key = %key, "No settings document found, starting empty");
                SettingsStore::default()
            }
            Err(err) => {
                tracing::error!(key = %key, error = %err, "Failed to load settings document");
                return Err(err.into());
            }
        };

        tracing::info!(
            key = %key,
            configs = store.configs().len(),
            renderers = store.renderers().len(),
            "Settings loaded"
        );

        Ok(Self {
            storage,
            key,
            store: RwLock::new(store),
        })
    }

    /// Storage key of the settings document
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a config by name
    pub async fn get_config(&self, name: &str) -> Result<Config, CallFlowError> {
        self.store
            .read()
            .await
            .config(name)
            .cloned()
            .ok_or_else(|| CallFlowError::InvalidArgument(format!("Invalid config: {}", name)))
    }

    /// Get a renderer by name
    pub async fn get_renderer(&self, name: &str) -> Result<Renderer, CallFlowError> {
        self.store
            .read()
            .await
            .renderer(name)
            .cloned()
            .ok_or_else(|| CallFlowError::InvalidArgument(format!("Invalid renderer: {}", name)))
    }

    /// Whether a config named `name` exists
    pub async fn has_config(&self, name: &str) -> bool {
        self.store.read().await.has_config(name)
    }

    /// Whether a renderer named `name` exists
    pub async fn has_renderer(&self, name: &str) -> bool {
        self.store.read().await.has_renderer(name)
    }

    /// All configs in stored order
    pub async fn all_configs(&self) -> Vec<Config> {
        self.store.read().await.configs().to_vec()
    }

    /// All renderers in stored order
    pub async fn all_renderers(&self) -> Vec<Renderer> {
        self.store.read().await.renderers().to_vec()
    }

    /// Consistent snapshot of both collections
    pub async fn settings(&self) -> Settings {
        self.store.read().await.settings().clone()
    }

    /// Replace all configs, persist, then expose the new index
    pub async fn update_configs(&self, configs: Vec<Config>) -> Result<(), CallFlowError> {
        let mut store = self.store.write().await;
        let next = store.with_configs(configs)?;
        self.persist(&next).await?;
        *store = next;

        tracing::info!(key = %self.key, configs = store.configs().len(), "Configs updated");
        Ok(())
    }

    /// Replace all renderers, persist, then expose the new index
    pub async fn update_renderers(&self, renderers: Vec<Renderer>) -> Result<(), CallFlowError> {
        let mut store = self.store.write().await;
        let next = store.with_renderers(renderers)?;
        self.persist(&next).await?;
        *store = next;

        tracing::info!(key = %self.key, renderers = store.renderers().len(), "Renderers updated");
        Ok(())
    }

    async fn persist(&self, store: &SettingsStore) -> Result<(), CallFlowError> {
        let raw = store.to_raw()?;
        if let Err(err) = self.storage.save_raw_config(&self.key, &raw).await {
            tracing::error!(key = %self.key, error = %err, "Failed to persist settings");
            return Err(err.into());
        }
        tracing::debug!(key = %self.key, bytes = raw.len(), "Settings persisted");
        Ok(())
    }
}

impl std::fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigService")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
