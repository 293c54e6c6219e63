//! Testing utilities for the call flows services.
//!
//! Provides fixture data (flow documents, settings) and test
//! implementations (fakes) of the storage and event collaborators.

pub mod data_generators;
pub mod implementations;

pub use data_generators::flows::{bad_flow_raw, main_flow, main_flow_raw, named_flow};
pub use data_generators::settings::{default_settings, settings_document, SETTINGS_FILE_NAME};
pub use implementations::recording_publisher::RecordingEventPublisher;
pub use implementations::recording_storage::RecordingRawConfigStore;
