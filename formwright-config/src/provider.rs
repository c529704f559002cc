//! Configuration provider using Figment

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::types::FormwrightConfig;
use crate::ConfigResult;

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "FORMWRIGHT_";

/// Configuration provider using figment
///
/// Sources are merged in precedence order, later ones winning:
/// 1. Built-in defaults
/// 2. Global file in `~/.formwright/`
/// 3. Project file in `./.formwright/`
/// 4. `FORMWRIGHT_` environment variables, `__` separating nested keys
///
/// Nothing is cached; every `load` reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific file discovery instead of the current and home directories.
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration from all sources.
    pub fn load(&self) -> ConfigResult<FormwrightConfig> {
        let config: FormwrightConfig = self.build_figment().extract()?;
        config.validate()?;
        debug!(
            data_dir = %config.storage.dir.display(),
            format = ?config.storage.format,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Build the figment configuration with all sources in precedence order
    pub fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FormwrightConfig::default()));

        for file in self.discovery.discover_all() {
            trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
            figment = figment.merge(file_provider(&file));
        }

        figment.merge(env_provider())
    }
}

fn file_provider(file: &ConfigFile) -> Figment {
    let path = &file.path;
    match file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
        ConfigFormat::Json => Figment::from(Json::file(path)),
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .map(|key| key.as_str().to_lowercase().into())
        .split("__")
}
