//! Environment-selected YAML settings.
//!
//! Settings come from `config/{env}.yml` under a root directory, where the
//! environment name is taken from `JIRADM_ENV` (default `devel`). An
//! optional `config/private.yml` overlays the primary file: its top-level
//! keys replace the primary's wholesale. A missing primary file is fatal;
//! a missing overlay is ignored.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

/// Env var naming the configuration environment.
pub const ENV_VAR: &str = "JIRADM_ENV";

const DEFAULT_ENVIRONMENT: &str = "devel";

/// Loaded application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Tracker connection settings under the `jira` key.
    pub jira: JiraSettings,
}

/// Settings for the tracker service.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraSettings {
    /// Base URL of the tracker REST API.
    pub url: String,
}

impl Settings {
    /// Loads settings for the environment named by `JIRADM_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error string when the primary config file is missing or
    /// unparsable, or when the merged document lacks `jira.url`.
    pub fn load(root: &Path) -> Result<Self, String> {
        let environment =
            std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        Self::load_environment(root, &environment)
    }

    /// Loads settings for a named environment.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Settings::load`].
    pub fn load_environment(root: &Path, environment: &str) -> Result<Self, String> {
        let primary_path = root.join("config").join(format!("{environment}.yml"));
        let primary = fs::read_to_string(&primary_path).map_err(|e| {
            format!(
                "unable to read config file {}: {e}. \
                 See README.md for setting up your environment.",
                primary_path.display()
            )
        })?;
        let mut merged: serde_yaml::Mapping = serde_yaml::from_str(&primary)
            .map_err(|e| format!("invalid YAML in {}: {e}", primary_path.display()))?;

        let private_path = root.join("config").join("private.yml");
        if let Ok(private) = fs::read_to_string(&private_path) {
            let overlay: serde_yaml::Mapping = serde_yaml::from_str(&private)
                .map_err(|e| format!("invalid YAML in {}: {e}", private_path.display()))?;
            for (key, value) in overlay {
                merged.insert(key, value);
            }
        }

        info!("using {environment} environment configuration");
        serde_yaml::from_value(serde_yaml::Value::Mapping(merged))
            .map_err(|e| format!("invalid configuration: {e}"))
    }
}
