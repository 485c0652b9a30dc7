//! Configuration loading for Dashbrr.
//!
//! Sources, later ones overriding earlier:
//! 1. Built-in defaults
//! 2. Global config file (`<config dir>/dashbrr/config.toml`)
//! 3. File passed with `--config`
//! 4. `DASHBRR_*` environment variables

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const ENV_DB_PATH: &str = "DASHBRR_DB_PATH";
pub const ENV_PROBE_TIMEOUT_SECS: &str = "DASHBRR_PROBE_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "DASHBRR_LOG_LEVEL";

const MIN_PROBE_TIMEOUT_SECS: u64 = 1;
const MAX_PROBE_TIMEOUT_SECS: u64 = 120;

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// SQLite file holding services and users
    pub database_path: PathBuf,
    /// Upper bound for each health probe
    pub probe_timeout_secs: u64,
    /// Default `tracing` directive when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            probe_timeout_secs: 10,
            log_level: "warn".to_string(),
        }
    }
}

/// A config file; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    probe_timeout_secs: Option<u64>,
    log_level: Option<String>,
}

impl Config {
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(path) = file.database_path {
            self.database_path = path;
        }
        if let Some(secs) = file.probe_timeout_secs {
            self.probe_timeout_secs = secs;
        }
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
    }

    /// Apply `DASHBRR_*` overrides read through `lookup`.
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DB_PATH) {
            self.database_path = PathBuf::from(value);
        }

        if let Some(value) = lookup(ENV_PROBE_TIMEOUT_SECS) {
            self.probe_timeout_secs = value.trim().parse().map_err(|e| {
                Error::invalid_config(format!("Invalid {ENV_PROBE_TIMEOUT_SECS} value: {e}"))
            })?;
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::invalid_config("database_path cannot be empty"));
        }

        if !(MIN_PROBE_TIMEOUT_SECS..=MAX_PROBE_TIMEOUT_SECS).contains(&self.probe_timeout_secs) {
            return Err(Error::invalid_config(format!(
                "probe_timeout_secs must be {MIN_PROBE_TIMEOUT_SECS}-{MAX_PROBE_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }
}

/// Load configuration from all sources.
///
/// `explicit` is the `--config` path; unlike the global file it must exist.
///
/// # Errors
///
/// Returns error if a file cannot be read, is malformed TOML, or the merged
/// values fail validation.
pub async fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            config.merge(load_toml_file(&global_path).await?);
        }
    }

    if let Some(path) = explicit {
        config.merge(load_toml_file(path).await?);
    }

    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dashbrr")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "dashbrr").map_or_else(
        || PathBuf::from("data").join("dashbrr.db"),
        |dirs| dirs.data_dir().join("dashbrr.db"),
    )
}

async fn load_toml_file(path: &Path) -> Result<ConfigFile> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::invalid_config(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::parse_error(format!("Failed to parse config {}: {e}", path.display())))
}
