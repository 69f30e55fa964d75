//! TOML configuration for the CLI.
//!
//! The config file is optional; every field has a sensible default so the
//! tool works out of the box. CLI flags always win over file values.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection = "sqlite:budget.db?mode=rwc"
//!
//! [tracker]
//! payday = 25
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use fin_core::db::DbConfig;
use serde::Deserialize;

/// Connection string used when no config file names one.
pub const DEFAULT_CONNECTION: &str = "sqlite:budget.db?mode=rwc";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    tracker: TrackerSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseSection {
    #[serde(default = "default_backend")]
    backend: String,
    #[serde(default = "default_connection")]
    connection: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            connection: default_connection(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackerSection {
    payday: Option<u32>,
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_connection() -> String {
    DEFAULT_CONNECTION.to_string()
}

/// Resolved configuration the commands work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db: DbConfig,
    pub payday: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db: DbConfig {
                backend: default_backend(),
                connection_string: default_connection(),
            },
            payday: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// With `None`, or when the default file is absent, the defaults apply.
    /// An explicitly named file that cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        Self::from_toml(&raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))
    }

    fn from_toml(raw: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(raw).context("failed to parse TOML")?;
        Ok(Self {
            db: DbConfig {
                backend: file.database.backend,
                connection_string: file.database.connection,
            },
            payday: file.tracker.payday,
        })
    }
}
