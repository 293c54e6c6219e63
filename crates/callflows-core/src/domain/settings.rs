//! Provider and renderer settings
//!
//! [`Settings`] is the aggregate persisted as one raw document.
//! [`SettingsStore`] is an immutable, name-indexed view over it; mutations
//! build a new store and the owner swaps it in.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::CallFlowError;

/// Outbound calling configuration for one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Unique provider name
    pub name: String,

    /// HTTP method used to place an outbound call
    #[serde(default)]
    pub outgoing_call_method: String,

    /// URI template used to place an outbound call
    #[serde(default)]
    pub outgoing_call_uri_template: String,

    /// Extra headers sent with POST outbound calls
    #[serde(default)]
    pub outgoing_call_post_headers_map: BTreeMap<String, String>,

    /// Body sent with POST outbound calls
    #[serde(default)]
    pub outgoing_call_post_params: String,

    /// Maximum concurrent outbound calls
    #[serde(default)]
    pub outbound_call_limit: i32,

    /// Retries for a failed outbound call
    #[serde(default)]
    pub outbound_call_retry_attempts: i32,

    /// Delay between retries, in seconds
    #[serde(default)]
    pub outbound_call_retry_seconds: i32,

    /// Whether outbound calls are currently permitted
    #[serde(default)]
    pub call_allowed: bool,

    /// Services exposed to flows through this provider
    #[serde(default)]
    pub services_map: BTreeMap<String, String>,

    /// Users allowed to place test calls, keyed by user name
    #[serde(default)]
    pub test_users_map: BTreeMap<String, String>,
}

/// Named template for one output mime type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renderer {
    /// Unique renderer name
    pub name: String,

    /// Output content type
    pub mime_type: String,

    /// Template body
    pub template: String,
}

/// The persisted aggregate: ordered configs and renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Provider configurations, first is the conventional default
    #[serde(default)]
    pub configs: Vec<Config>,

    /// Output renderers
    #[serde(default)]
    pub renderers: Vec<Renderer>,
}

trait Named {
    fn name(&self) -> &str;
}

impl Named for Config {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Renderer {
    fn name(&self) -> &str {
        &self.name
    }
}

fn index_by_name<T: Named>(items: &[T]) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| (item.name().to_string(), position))
        .collect()
}

fn check_names<T: Named>(items: &[T], kind: &str) -> Result<(), CallFlowError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let name = item.name();
        if name.trim().is_empty() {
            return Err(CallFlowError::InvalidArgument(format!(
                "{} name must not be empty",
                kind
            )));
        }
        if !seen.insert(name) {
            return Err(CallFlowError::InvalidArgument(format!(
                "Duplicate {} name: {}",
                kind.to_lowercase(),
                name
            )));
        }
    }
    Ok(())
}

/// Immutable name index over a [`Settings`] aggregate
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
    config_index: HashMap<String, usize>,
    renderer_index: HashMap<String, usize>,
}

impl SettingsStore {
    /// Build an index over `settings`.
    ///
    /// Stored documents are indexed as-is; when a name repeats, lookups
    /// resolve to its last occurrence.
    pub fn from_settings(settings: Settings) -> Self {
        let config_index = index_by_name(&settings.configs);
        let renderer_index = index_by_name(&settings.renderers);
        Self {
            settings,
            config_index,
            renderer_index,
        }
    }

    /// Deserialize a raw settings document and index it
    pub fn from_raw(raw: &[u8]) -> Result<Self, CallFlowError> {
        let settings: Settings = serde_json::from_slice(raw)?;
        Ok(Self::from_settings(settings))
    }

    /// Serialize the whole aggregate as a pretty-printed JSON document
    pub fn to_raw(&self) -> Result<Vec<u8>, CallFlowError> {
        Ok(serde_json::to_vec_pretty(&self.settings)?)
    }

    /// The indexed aggregate
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Look up a config by name
    pub fn config(&self, name: &str) -> Option<&Config> {
        self.config_index
            .get(name)
            .and_then(|&position| self.settings.configs.get(position))
    }

    /// Look up a renderer by name
    pub fn renderer(&self, name: &str) -> Option<&Renderer> {
        self.renderer_index
            .get(name)
            .and_then(|&position| self.settings.renderers.get(position))
    }

    /// Whether a config with `name` exists
    pub fn has_config(&self, name: &str) -> bool {
        self.config_index.contains_key(name)
    }

    /// Whether a renderer with `name` exists
    pub fn has_renderer(&self, name: &str) -> bool {
        self.renderer_index.contains_key(name)
    }

    /// Configs in stored order
    pub fn configs(&self) -> &[Config] {
        &self.settings.configs
    }

    /// Renderers in stored order
    pub fn renderers(&self) -> &[Renderer] {
        &self.settings.renderers
    }

    /// A new store with `configs` replacing the current configs
    pub fn with_configs(&self, configs: Vec<Config>) -> Result<Self, CallFlowError> {
        check_names(&configs, "Config")?;
        Ok(Self::from_settings(Settings {
            configs,
            renderers: self.settings.renderers.clone(),
        }))
    }

    /// A new store with `renderers` replacing the current renderers
    pub fn with_renderers(&self, renderers: Vec<Renderer>) -> Result<Self, CallFlowError> {
        check_names(&renderers, "Renderer")?;
        Ok(Self::from_settings(Settings {
            configs: self.settings.configs.clone(),
            renderers,
        }))
    }
}
