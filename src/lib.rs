//! Core library entry for the `jiradm` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod connector;
pub mod ports;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution
/// fails. Help and version requests are printed and treated as success.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => return Err(err.to_string()),
        Err(err) => {
            print!("{err}");
            return Ok(());
        }
    };
    commands::dispatch(&cli)
}
