//! Update notification
//!
//! The execution controller awaits an [`UpdateNotifier`] exactly once per
//! run, on success and on failure alike. [`RegistryNotifier`] looks up the
//! latest published version (at most once per process, and at most once per
//! check interval across runs thanks to a small cache file) and tells the user
//! when a newer one exists. Notification never fails the run.

pub mod cache;
pub mod version;

pub use cache::CheckCache;
pub use version::Version;

use crate::{
    config::{Config, PACKAGE_NAME, PACKAGE_VERSION, UpdateConfig},
    create::PackageManager,
    error::{CreateError, Result},
    utils::FileSystemUtils,
};
use chrono::Utc;
use colored::Colorize;
use reqwest::{Client, header};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

const ABBREVIATED_METADATA: &str = "application/vnd.npm.install-v1+json; q=1.0, application/json; q=0.8";

/// Tells the user about newer releases of the tool
#[allow(async_fn_in_trait)]
pub trait UpdateNotifier {
    /// Deliver a notification if one is due; resolves once delivered or skipped
    async fn notify(&self);
}

/// Subset of the registry's package document
#[derive(Debug, Deserialize)]
struct RegistryPackage {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

/// Update notifier backed by an npm-compatible registry
#[derive(Debug)]
pub struct RegistryNotifier {
    config: UpdateConfig,
    package: String,
    current: String,
    package_manager: PackageManager,
    fs_utils: FileSystemUtils,
    state: OnceCell<Option<Version>>,
}

impl RegistryNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.update.clone(),
            package: PACKAGE_NAME.to_string(),
            current: PACKAGE_VERSION.to_string(),
            package_manager: PackageManager::from_user_agent(config.user_agent.as_deref()),
            fs_utils: FileSystemUtils::new(),
            state: OnceCell::new(),
        }
    }

    /// Compare against a different installed version
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current = version.into();
        self
    }

    /// Latest published version when it is newer than the running one
    ///
    /// Computed on first use and remembered for the rest of the process.
    pub async fn check(&self) -> Option<Version> {
        self.state
            .get_or_init(|| async {
                if !self.config.enabled {
                    debug!("Update check disabled");
                    return None;
                }
                match self.newer_version().await {
                    Ok(newer) => newer,
                    Err(e) => {
                        debug!("Update check failed: {}", e.detail());
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Message shown when `latest` is available
    pub fn update_message(&self, latest: &Version) -> String {
        format!(
            "{}\nYou can update by running: {}",
            format!(
                "A new version of `{}` is available! ({} -> {})",
                self.package, self.current, latest
            )
            .yellow()
            .bold(),
            self.package_manager
                .global_install_hint(&self.package)
                .to_string()
                .cyan()
        )
    }

    #[instrument(skip(self))]
    async fn newer_version(&self) -> Result<Option<Version>> {
        let current: Version = self
            .current
            .parse()
            .map_err(|e: String| CreateError::validation(format!("Invalid current version: {e}")))?;
        let latest = self.latest_version().await?;

        debug!("Current version {}, latest {}", current, latest);
        Ok((latest > current).then_some(latest))
    }

    async fn latest_version(&self) -> Result<Version> {
        let now = Utc::now();

        let cached = self
            .fs_utils
            .read_json::<CheckCache, _>(&self.config.cache_path)
            .ok()
            .filter(|cache| cache.is_fresh(now, self.config.interval));

        let latest = match cached {
            Some(cache) => {
                debug!("Using cached update check from {:?}", cache.checked_at());
                cache.latest
            }
            None => {
                let latest = self.fetch_latest().await?;
                if let Err(e) = self
                    .fs_utils
                    .write_json(&self.config.cache_path, &CheckCache::new(latest.as_str(), now))
                {
                    debug!("Could not write update check cache: {}", e);
                }
                latest
            }
        };

        latest
            .parse()
            .map_err(|e: String| CreateError::registry(format!("Invalid latest version: {e}"), None))
    }

    async fn fetch_latest(&self) -> Result<String> {
        let url = format!("{}/{}", self.config.registry_url, self.package);
        debug!("Checking for updates at {}", url);

        let client = Client::builder()
            .timeout(self.config.timeout)
            .user_agent(format!("{}/{}", self.package, self.current))
            .build()
            .map_err(|e| CreateError::registry("Failed to build HTTP client", Some(e)))?;

        let package: RegistryPackage = client
            .get(&url)
            .header(header::ACCEPT, ABBREVIATED_METADATA)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| CreateError::registry(format!("Request to {url} failed"), Some(e)))?
            .json()
            .await
            .map_err(|e| CreateError::registry("Invalid registry response", Some(e)))?;

        package
            .dist_tags
            .get("latest")
            .cloned()
            .ok_or_else(|| CreateError::registry("Registry response has no latest dist-tag", None))
    }
}

impl UpdateNotifier for RegistryNotifier {
    async fn notify(&self) {
        if let Some(latest) = self.check().await {
            println!();
            println!("{}", self.update_message(&latest));
            println!();
        }
    }
}
