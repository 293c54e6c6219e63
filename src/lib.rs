//! Call Flows
//!
//! Process bootstrap for the call flow services: configuration loading,
//! logging and service wiring.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::{validate_document_file, App};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
