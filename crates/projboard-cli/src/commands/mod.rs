//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use projboard_core::BoardConfig;
use projboard_ui::App;
use std::path::PathBuf;

pub mod demo;
pub mod shell;

/// Projboard - track projects across active and finished lists
#[derive(Parser)]
#[command(name = "projboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Board configuration file (TOML)
    #[arg(short, long, global = true, env = "PROJBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run board commands interactively or from a script
    Shell(shell::ShellArgs),

    /// Add and move sample projects, then print the board
    Demo(demo::DemoArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config = BoardConfig::load(self.config.as_deref()).context("Failed to load board configuration")?;
        let app = App::from_config(&config).context("Failed to attach the board")?;

        match self.command {
            Commands::Shell(args) => shell::execute(args, &app),
            Commands::Demo(args) => demo::execute(args, &app),
        }
    }
}
