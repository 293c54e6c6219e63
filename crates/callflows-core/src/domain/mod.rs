/// Call flow entity, status and request models
pub mod call_flow;

/// Domain events
pub mod events;

/// Repository interfaces
pub mod repository;

/// Provider and renderer settings
pub mod settings;

/// Name validation
pub mod validation;
