//! Formwright configuration management using Figment
//!
//! # Features
//!
//! - **Multiple file formats**: TOML, YAML, JSON with automatic format detection
//! - **File discovery**: `formwright.*` in `~/.formwright/` and `./.formwright/`
//! - **Environment integration**: `FORMWRIGHT_` prefix, `__` for nested keys
//! - **Proper precedence**: defaults → global → project → env → CLI
//!
//! # Quick Start
//!
//! ```no_run
//! use formwright_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("data lives in {}", config.storage.dir.display());
//! # Ok::<(), formwright_config::ConfigError>(())
//! ```
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! [storage]
//! dir = "/var/lib/formwright"
//! format = "yaml"
//!
//! [log]
//! filter = "formwright_store=debug"
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_DIR_NAME};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{FormwrightConfig, LogConfig, StorageConfig, DEFAULT_DATA_DIR, DEFAULT_LOG_FILTER};

/// Load configuration from the default sources.
pub fn load_configuration() -> ConfigResult<FormwrightConfig> {
    ConfigProvider::new().load()
}
