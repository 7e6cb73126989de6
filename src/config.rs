//! Configuration management for create-turbo
//!
//! Runtime settings come from the environment rather than the command line,
//! which keeps the CLI surface limited to the project options. Values are
//! read through a lookup function so they can be resolved from any source.

use crate::{error::CreateError, utils::EnvUtils};
use reqwest::Url;
use std::{path::PathBuf, time::Duration};

/// Name the tool is published under
pub const PACKAGE_NAME: &str = "create-turbo";

/// Version of this build
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";
const DEFAULT_UPDATE_TIMEOUT_MS: u64 = 1500;
const UPDATE_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Package manager user agent of the invoking process, if any
    pub user_agent: Option<String>,
    /// Update check configuration
    pub update: UpdateConfig,
}

/// Update check configuration
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Whether the registry is consulted at all
    pub enabled: bool,
    /// Registry base URL
    pub registry_url: String,
    /// Request timeout for the registry lookup
    pub timeout: Duration,
    /// Minimum age of the cached result before the registry is queried again
    pub interval: Duration,
    /// Where the last check result is cached between runs
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            user_agent: None,
            update: UpdateConfig::default(),
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            registry_url: DEFAULT_REGISTRY.to_string(),
            timeout: Duration::from_millis(DEFAULT_UPDATE_TIMEOUT_MS),
            interval: UPDATE_INTERVAL,
            cache_path: std::env::temp_dir()
                .join("update-check")
                .join(format!("{PACKAGE_NAME}-latest.json")),
        }
    }
}

impl Config {
    /// Create configuration from the process environment
    pub fn from_env() -> Result<Self, CreateError> {
        Self::from_lookup(EnvUtils::get_var)
    }

    /// Settings from the process environment that cannot fail to resolve
    pub fn base_from_env() -> Self {
        Self::base_from_lookup(&EnvUtils::get_var)
    }

    /// Resolve the flags and user agent; everything else keeps its default
    pub fn base_from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|value| EnvUtils::is_truthy(&value));

        let mut config = Self {
            debug: flag("CREATE_TURBO_DEBUG"),
            user_agent: lookup("npm_config_user_agent"),
            ..Self::default()
        };

        config.update.enabled = !(flag("CREATE_TURBO_NO_UPDATE_CHECK") || flag("NO_UPDATE_NOTIFIER"));
        config
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CreateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::base_from_lookup(&lookup);

        if let Some(registry) = lookup("CREATE_TURBO_REGISTRY").or_else(|| lookup("npm_config_registry")) {
            config.update.registry_url = registry.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("CREATE_TURBO_UPDATE_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                CreateError::config(format!("CREATE_TURBO_UPDATE_TIMEOUT_MS must be a number of milliseconds, got '{raw}'"))
            })?;
            config.update.timeout = Duration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CreateError> {
        let url = Url::parse(&self.update.registry_url).map_err(|e| {
            CreateError::config(format!(
                "Invalid registry URL '{}': {e}",
                self.update.registry_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CreateError::config(format!(
                "Registry URL must use http or https: {}",
                self.update.registry_url
            )));
        }

        Ok(())
    }
}
