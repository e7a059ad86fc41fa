//! Configuration loading.
//!
//! Sources are merged in this order, later ones winning:
//! 1. Defaults from [`WelderConfig::default`]
//! 2. A TOML file, if one is given and exists
//! 3. Environment variables prefixed with `CRYPTOWELDER_` (e.g. `CRYPTOWELDER_MODULE`)
//! 4. An explicit override set with [`ConfigLoader::with_module`]

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigurationError;
use crate::module::DEFAULT_MODULE;

/// Prefix of environment variables read by [`ConfigLoader`].
pub const CONFIG_ENV_PREFIX: &str = "CRYPTOWELDER_";

/// Environment variable naming the module to load.
pub const MODULE_ENV_VAR: &str = "CRYPTOWELDER_MODULE";

/// Process-level settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelderConfig {
    /// Name of the module to load.
    pub module: String,
}

impl Default for WelderConfig {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_string(),
        }
    }
}

/// Builds a [`WelderConfig`] from layered sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    module: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the module regardless of file and environment.
    pub fn with_module<S: Into<String>>(mut self, module: S) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Load configuration from all sources.
    pub fn load(&self) -> Result<WelderConfig, ConfigurationError> {
        let mut figment = Figment::new().merge(Serialized::defaults(WelderConfig::default()));

        if let Some(path) = &self.config_path {
            if path.exists() {
                debug!(path = %path.display(), "Loading configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                debug!(path = %path.display(), "Configuration file not found, skipping");
            }
        }

        figment = figment.merge(Env::prefixed(CONFIG_ENV_PREFIX));

        if let Some(module) = &self.module {
            figment = figment.merge(Serialized::default("module", module));
        }

        let config: WelderConfig = figment
            .extract()
            .map_err(|e| ConfigurationError::Load(e.to_string()))?;

        validate_config(&config)?;

        Ok(config)
    }
}

fn validate_config(config: &WelderConfig) -> Result<(), ConfigurationError> {
    if config.module.trim().is_empty() {
        return Err(ConfigurationError::EmptyModuleName);
    }
    Ok(())
}
