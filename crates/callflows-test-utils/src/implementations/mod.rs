//! Test implementations (fakes) of the service collaborators.

pub mod recording_publisher;
pub mod recording_storage;
