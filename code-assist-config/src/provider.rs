//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::{CodeAssistConfig, ConfigOverrides},
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

/// Prefix for environment variables that map onto configuration keys
pub const ENV_PREFIX: &str = "CODE_ASSIST_";

/// Legacy variable accepted as the internet tool's API key
pub const LEGACY_API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

/// Configuration provider using figment
///
/// Sources are merged in precedence order, later sources overriding earlier ones:
/// 1. Default values
/// 2. Discovered configuration files (global, then project)
/// 3. `PERPLEXITY_API_KEY`, then `CODE_ASSIST_*` environment variables
/// 4. Command line overrides
///
/// Nothing is cached; every call reads the sources again.
#[derive(Debug, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Create a provider that discovers files in the standard locations
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with a custom file discovery
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration without command line overrides
    pub fn load(&self) -> ConfigResult<CodeAssistConfig> {
        self.load_with_overrides(&ConfigOverrides::default())
    }

    /// Load and validate the configuration, applying command line overrides last
    pub fn load_with_overrides(&self, overrides: &ConfigOverrides) -> ConfigResult<CodeAssistConfig> {
        let config: CodeAssistConfig = self.build_figment(overrides).extract()?;
        config.validate()?;

        debug!(
            "Loaded configuration with {} allowed roots",
            config.allowed_roots.len()
        );
        Ok(config)
    }

    fn build_figment(&self, overrides: &ConfigOverrides) -> Figment {
        debug!("Building figment configuration with precedence order");

        Figment::new()
            .merge(Serialized::defaults(CodeAssistConfig::default()))
            .merge(self.load_discovered_config_files())
            .merge(Self::load_env_vars())
            .merge(Serialized::globals(overrides))
    }

    fn load_discovered_config_files(&self) -> Figment {
        let mut figment = Figment::new();
        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(Self::load_config_file(&config_file));
        }
        figment
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }

    fn load_env_vars() -> Figment {
        Figment::new()
            .merge(
                Env::raw()
                    .only(&[LEGACY_API_KEY_VAR])
                    .map(|_| "internet.api_key".into()),
            )
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
    }
}
