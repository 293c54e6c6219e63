//! Structured logging setup using tracing.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

/// Initialize structured logging.
///
/// `RUST_LOG` wins over the configured filter when set.
pub fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_logs {
        // JSON logs for production
        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing::subscriber::set_global_default(registry.with(json_layer))
            .context("Failed to set global default subscriber")?;
    } else {
        // Pretty logs for development
        let fmt_layer = fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing::subscriber::set_global_default(registry.with(fmt_layer))
            .context("Failed to set global default subscriber")?;
    }

    info!(
        log_format = if config.json_logs { "json" } else { "pretty" },
        log_filter = %config.log_filter,
        "Logging initialized"
    );

    Ok(())
}
