//!
//! Call Flows Core - lifecycle services for call flows and provider settings
//!
//! This crate defines the domain models, the repository contract and the
//! services that create, update, find and delete call flows, plus the
//! settings service that keeps the provider/renderer index consistent with
//! its persisted document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - core business models, entities, and rules
pub mod domain;

/// Application services - core application logic
pub mod application;

/// Error types
pub mod error;

// Re-export key types
pub use error::{CallFlowError, ConstraintViolations, ErrorKind};

// Re-export main API types for easy use
pub use application::authorization::{
    AuthorizedCallFlowService, AuthorizedConfigService, Privilege, UserContext,
};
pub use application::call_flow_service::CallFlowService;
pub use application::config_service::ConfigService;
pub use application::flow_validation::{
    CallFlowValidator, DslFlowDocumentValidator, FlowDocumentValidator,
};
pub use domain::call_flow::{CallFlow, CallFlowId, CallFlowRequest, CallFlowStatus};
pub use domain::events::{
    CallFlowEvent, CallFlowEventPublisher, NoopEventPublisher, TracingEventPublisher,
};
pub use domain::repository::CallFlowRepository;
pub use domain::settings::{Config, Renderer, Settings, SettingsStore};
pub use domain::validation::{is_valid_name, validate_name};

#[cfg(feature = "testing")]
pub use domain::repository::memory::MemoryCallFlowRepository;
