//! Configuration values

use std::path::PathBuf;

use formwright_store::StorageFormat;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".formwright/data";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Top-level Formwright configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormwrightConfig {
    pub storage: StorageConfig,
    pub log: LogConfig,
}

/// Where and how the collections are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub format: StorageFormat,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DATA_DIR),
            format: StorageFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `warn` or `formwright_store=debug`
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl FormwrightConfig {
    /// Replace the data directory, as the `--data-dir` flag does.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.dir = dir.into();
        self
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("storage.dir", "must not be empty"));
        }
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::invalid_value("log.filter", "must not be empty"));
        }
        Ok(())
    }
}
