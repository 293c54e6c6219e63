//! Service wiring
//!
//! Builds the settings and call flow services from an [`AppConfig`].

use callflows_content_store::{FileRawConfigStore, RawConfigStorage};
use callflows_core::{
    AuthorizedCallFlowService, AuthorizedConfigService, CallFlowRepository, CallFlowService,
    CallFlowEventPublisher, ConfigService, ConstraintViolations, DslFlowDocumentValidator,
    FlowDocumentValidator, MemoryCallFlowRepository, NoopEventPublisher, TracingEventPublisher,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Running services, each owned once and shared by reference
#[derive(Debug, Clone)]
pub struct App {
    /// Settings service
    pub config_service: Arc<ConfigService>,
    /// Call flow service
    pub call_flow_service: Arc<CallFlowService>,
}

impl App {
    /// Wire the services over file-backed settings storage
    pub async fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let storage: Arc<dyn RawConfigStorage> =
            Arc::new(FileRawConfigStore::new(&config.settings_dir));
        let repository: Arc<dyn CallFlowRepository> = Arc::new(MemoryCallFlowRepository::new());
        Self::with_collaborators(config, storage, repository).await
    }

    /// Wire the services over the given collaborators
    pub async fn with_collaborators(
        config: &AppConfig,
        storage: Arc<dyn RawConfigStorage>,
        repository: Arc<dyn CallFlowRepository>,
    ) -> AppResult<Self> {
        let config_service =
            Arc::new(ConfigService::initialize(storage, config.settings_file_name.clone()).await?);

        let events: Arc<dyn CallFlowEventPublisher> = if config.log_events {
            Arc::new(TracingEventPublisher)
        } else {
            Arc::new(NoopEventPublisher)
        };
        let call_flow_service =
            Arc::new(CallFlowService::new(repository).with_event_publisher(events));

        info!(
            dsl_version = callflows_dsl::version(),
            log_events = config.log_events,
            settings = %config.settings_path().display(),
            configs = config_service.all_configs().await.len(),
            renderers = config_service.all_renderers().await.len(),
            "Call flow services ready"
        );

        Ok(Self {
            config_service,
            call_flow_service,
        })
    }

    /// Call flow service behind privilege checks
    pub fn authorized_call_flows(&self) -> AuthorizedCallFlowService {
        AuthorizedCallFlowService::new(self.call_flow_service.clone())
    }

    /// Settings service behind privilege checks
    pub fn authorized_configs(&self) -> AuthorizedConfigService {
        AuthorizedConfigService::new(self.config_service.clone())
    }
}

/// Validate the flow document stored in the file at `path`.
///
/// Returns the violations found; an empty map means the document is valid.
pub async fn validate_document_file(path: &Path) -> AppResult<ConstraintViolations> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(match DslFlowDocumentValidator.parse_and_validate(&raw) {
        Ok(_) => ConstraintViolations::new(),
        Err(violations) => violations,
    })
}
