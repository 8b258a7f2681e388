//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use repo_overlay::output::OutputConfig;

use crate::commands;

/// Repo Overlay - Maintain a patched copy of a pinned upstream repository
#[derive(Parser, Debug)]
#[command(name = "repo-overlay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the overlay onto a fresh checkout of the pinned upstream revision
    Apply(commands::apply::ApplyArgs),

    /// Generate an overlay from the working tree's divergence against a git reference
    Generate(commands::generate::GenerateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Apply(args) => commands::apply::execute(args, &output),
            Commands::Generate(args) => commands::generate::execute(args, &output),
        }
    }
}
