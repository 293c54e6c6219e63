use anyhow::{Context, Result};
use callflows::{logging, validate_document_file, App, AppConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "callflows", about = "Call flow and provider settings services")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load settings, wire the services and print a summary (default)
    Status,
    /// Validate a flow document file and print its violations
    Validate {
        /// Path to the flow document (JSON)
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config).context("Failed to initialize logging")?;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => {
            let app = App::bootstrap(&config)
                .await
                .context("Failed to start call flow services")?;

            for provider in app.config_service.all_configs().await {
                println!(
                    "config   {} ({} {})",
                    provider.name, provider.outgoing_call_method, provider.outgoing_call_uri_template
                );
            }
            for renderer in app.config_service.all_renderers().await {
                println!("renderer {} ({})", renderer.name, renderer.mime_type);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { path } => {
            let violations = validate_document_file(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;

            if violations.is_empty() {
                info!(path = %path.display(), "Flow document is valid");
                println!("{}: valid", path.display());
                return Ok(ExitCode::SUCCESS);
            }

            for (field, reason) in &violations {
                println!("{} -> {}", field, reason);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
