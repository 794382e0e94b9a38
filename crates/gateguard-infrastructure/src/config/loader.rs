//! Configuration loader
//!
//! Loads configuration from TOML files, environment variables, and
//! default values using Figment.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME, JWT_MIN_SECRET_LEN,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use gateguard_domain::error::{Error, Result};
use gateguard_domain::value_objects::Grant;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources.
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix (e.g. `GATEGUARD__STORE__PROVIDER`)
    pub fn load(&self) -> Result<AppConfig> {
        // Start with default configuration
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        // Add configuration file if specified
        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            if default_path.exists() {
                figment = figment.merge(Toml::file(&default_path));
                log_config_loaded(&default_path, true);
            }
        }

        // Add environment variables
        // Double underscore separates nested keys (e.g. GATEGUARD__RATE_LIMIT__LIMIT)
        figment = figment.merge(Env::prefixed(&format!("{}__", self.env_prefix)).split("__"));

        // Extract and deserialize configuration
        let app_config: AppConfig = figment
            .extract()
            .config_context("failed to extract configuration")?;

        // Validate configuration
        self.validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Reload configuration (useful for hot-reloading)
    pub fn reload(&self) -> Result<AppConfig> {
        self.load()
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).config_context("failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the default configuration file to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;
        let candidates = [
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        candidates.into_iter().find(|candidate| candidate.exists())
    }

    /// Validate the extracted configuration.
    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        if config.auth.enabled && config.auth.jwt.secret.len() < JWT_MIN_SECRET_LEN {
            return Err(Error::configuration(format!(
                "auth.jwt.secret must be at least {JWT_MIN_SECRET_LEN} characters when authentication is enabled"
            )));
        }
        if config.auth.jwt.token_ttl_hours == 0 {
            return Err(Error::configuration(
                "auth.jwt.token_ttl_hours must be non-zero",
            ));
        }
        if config.rate_limit.limit == 0 {
            return Err(Error::configuration("rate_limit.limit must be non-zero"));
        }
        if config.rate_limit.window_secs == 0 {
            return Err(Error::configuration(
                "rate_limit.window_secs must be non-zero",
            ));
        }
        if config.store.timeout_ms == 0 {
            return Err(Error::configuration("store.timeout_ms must be non-zero"));
        }
        if config.store.provider.is_empty() {
            return Err(Error::configuration("store.provider must be set"));
        }
        for (role, grants) in &config.roles {
            for raw in grants {
                Grant::parse(raw).map_err(|error| {
                    Error::configuration(format!("invalid grant '{raw}' for role '{role}': {error}"))
                })?;
            }
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
