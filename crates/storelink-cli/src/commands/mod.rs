//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch system.
//! Each command is implemented as an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use std::collections::HashMap;
use std::process::ExitCode;
use storelink_client::StoreClient;
use storelink_config::ConfigLoader;
use storelink_core::error::{StoreError, StoreResult};
use tracing::{debug, info};

pub mod api;
pub mod catalog;
pub mod fetch;
pub mod resolve;
pub mod sizes;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub client: StoreClient,
    /// Print JSON documents instead of formatted text
    pub json: bool,
}

impl CommandContext {
    /// Create a new command context, loading configuration from the working directory
    pub async fn new(cli_overrides: HashMap<String, String>, json: bool) -> StoreResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| StoreError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| StoreError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory is not valid UTF-8: {}", e),
        })?;

        let (settings, source) = ConfigLoader::new(cwd.clone()).load_settings(cli_overrides).await?;
        debug!(?source, endpoint = %settings.endpoint, "Loaded configuration");

        let client = StoreClient::with_settings(settings)?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            client,
            json,
        })
    }

    /// Print a serializable document as pretty JSON on stdout
    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| StoreError::Io {
            message: "Failed to encode JSON output".to_string(),
            source: e.into(),
        })?;
        println!("{}", text);
        Ok(())
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> StoreResult<ExitCode> {
    match command {
        Commands::Resolve { input } => {
            info!("Resolving input: {}", input);
            resolve::execute(&input, ctx).await?;
        }
        Commands::Catalog { product_id, advanced } => {
            info!("Listing catalog for {} (advanced: {})", product_id, advanced);
            catalog::execute(&product_id, advanced, ctx).await?;
        }
        Commands::Sizes { urls } => {
            info!("Probing {} URL(s)", urls.len());
            sizes::execute(&urls, ctx).await?;
        }
        Commands::Fetch { input, advanced } => {
            info!("Fetching installers for {} (advanced: {})", input, advanced);
            fetch::execute(&input, advanced, ctx).await?;
        }
        Commands::Api { operation, request } => {
            info!("Running {:?} operation", operation);
            return api::execute(operation, &request, ctx).await;
        }
        Commands::Version => {
            show_version(ctx);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn show_version(ctx: &CommandContext) {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("storelink v{}", version));
    ctx.output.info(&format!("Built: {}", build_date));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));
    ctx.output.info(&format!("Endpoint: {}", ctx.client.settings().endpoint));
    ctx.output.info(&format!("Config search root: {}", ctx.cwd));
}
