use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod config;
mod navigation;
mod pagination;
mod store;
mod tui;
mod utils;

use cli::Cli;

#[tokio::main]
async fn main() {
    // Set up panic hook for graceful error recovery
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        tui::reset_terminal();
        eprintln!("opsdesk panicked: {}", panic_info);
        std::process::exit(1);
    }));

    // Load environment variables from .env file
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug, log_target(&cli)) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = dotenv {
        // Don't error if .env file doesn't exist, just log it
        tracing::debug!("No .env file found or error loading it: {}", e);
    }

    // Execute CLI command
    if let Err(e) = cli.execute().await {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

/// Where logs go: the explicit `--log-file`, a file in the data dir while
/// the console owns the terminal, stderr otherwise
fn log_target(cli: &Cli) -> LogTarget {
    match &cli.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None if cli.is_interactive() => match dirs::data_local_dir() {
            Some(dir) => LogTarget::File(dir.join("opsdesk").join("opsdesk.log")),
            None => LogTarget::Discard,
        },
        None => LogTarget::Stderr,
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn init_logging(debug: bool, target: LogTarget) -> Result<()> {
    let default_directive = if debug { "opsdesk=debug" } else { "opsdesk=warn" };
    let env_filter = if debug {
        tracing_subscriber::EnvFilter::new(default_directive)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into())
    };

    let (writer, ansi) = match target {
        LogTarget::File(path) => (BoxMakeWriter::new(Mutex::new(open_log_file(&path)?)), false),
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::Discard => (BoxMakeWriter::new(std::io::sink), false),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
