// Call Flows Tests
//
// Shared setup for the cross-crate tests

use callflows::AppConfig;
use std::path::Path;

/// Default configuration with settings stored under `dir`
pub fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        settings_dir: dir.to_path_buf(),
        ..AppConfig::default()
    }
}
