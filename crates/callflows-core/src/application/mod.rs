/// Privilege-checking decorators
pub mod authorization;

/// Call flow lifecycle service
pub mod call_flow_service;

/// Provider and renderer settings service
pub mod config_service;

/// Flow document and call flow validation
pub mod flow_validation;
