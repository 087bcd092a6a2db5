//! Command dispatch and handlers.

pub mod console;

use std::sync::Arc;

use crate::adapters::live::LiveHttpTransport;
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::connector::Connector;

/// Dispatch a parsed command to its handler.
///
/// Settings are loaded first so a broken config fails fast, before any
/// interactive prompt.
///
/// # Errors
///
/// Returns an error string if settings cannot be loaded, the HTTP client
/// cannot be built, or the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::load(&cli.config_root)?;
    let transport = LiveHttpTransport::new().map_err(|e| e.to_string())?;
    let connector = Connector::new(settings.jira.url, Arc::new(transport));

    match cli.command {
        None | Some(Command::Console) => console::run(connector),
    }
}
