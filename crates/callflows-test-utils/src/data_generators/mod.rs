//! Fixture data for call flow and settings tests.

pub mod flows;
pub mod settings;
