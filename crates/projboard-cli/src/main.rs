//! Projboard CLI
//!
//! Drives the project board from the terminal: submit projects, drag them
//! between lists and inspect the rendered page.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

const DEFAULT_FILTER: &str = "projboard=info,projboard_core=info,projboard_ui=info";
const VERBOSE_FILTER: &str = "projboard=debug,projboard_core=debug,projboard_ui=debug";

/// Initialize tracing on stderr, optionally mirrored to a file.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) -> Result<()> {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(stderr).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.verbose)?;
    cli.execute()
}
