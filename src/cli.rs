//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `jiradm`.
#[derive(Debug, Parser)]
#[command(name = "jiradm", version, about = "Administer Jira users and groups")]
pub struct Cli {
    /// Directory containing the `config/` folder.
    #[arg(long, default_value = ".")]
    pub config_root: PathBuf,

    /// The command to execute. Defaults to the interactive console.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive admin console.
    Console,
}
