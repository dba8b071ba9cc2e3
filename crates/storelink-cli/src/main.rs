//! # storelink-cli
//!
//! Resolve Microsoft Store links and list the packages behind them.
//!
//! This is the main entry point for the storelink CLI tool. It handles command
//! parsing, sets up logging and error handling, loads configuration, and
//! dispatches to the appropriate command handlers.

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::process::ExitCode;
use storelink_core::error::{StoreError, StoreResult};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Resolve Microsoft Store links and list their downloadable packages
#[derive(Parser)]
#[command(name = "storelink", version, about = "Microsoft Store package link resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON documents instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the upstream listing endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Listing request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Per-URL size probe timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub probe_timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a store link or raw id to a product id
    Resolve {
        input: String,
    },
    /// List the files available for a product id
    Catalog {
        product_id: String,
        /// Also list blockmaps, manifests and other non-installer files
        #[arg(long)]
        advanced: bool,
    },
    /// Probe the byte size of up to ten URLs
    Sizes {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Resolve, list and size the installers for a link or id
    Fetch {
        input: String,
        /// Also list blockmaps, manifests and other non-installer files
        #[arg(long)]
        advanced: bool,
    },
    /// Run one request/response operation on a JSON document
    Api {
        #[arg(value_enum)]
        operation: ApiOperation,
        /// Request document, e.g. '{"url": "9NBLGGH4NNS1"}'
        request: String,
    },
    /// Show version information
    Version,
}

/// Request/response operations exposed by `storelink api`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiOperation {
    Extract,
    Store,
    Size,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting storelink v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> StoreResult<ExitCode> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| StoreError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli_overrides(&cli), cli.json).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

/// Global flags that feed the configuration layers
fn cli_overrides(cli: &Cli) -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    if let Some(endpoint) = &cli.endpoint {
        overrides.insert("endpoint".to_string(), endpoint.clone());
    }
    if let Some(timeout) = cli.timeout {
        overrides.insert("timeout".to_string(), timeout.to_string());
    }
    if let Some(timeout) = cli.probe_timeout {
        overrides.insert("probe-timeout".to_string(), timeout.to_string());
    }
    overrides
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storelink={level},storelink_cli={level},storelink_client={level},storelink_config={level},storelink_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("storelink encountered an unexpected error: {}", panic_info);
        eprintln!("storelink crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/storelink/storelink/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
