//! Persisted result of the last registry lookup

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Contents of the update-check cache file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCache {
    /// Milliseconds since the Unix epoch
    pub last_update: i64,
    pub latest: String,
}

impl CheckCache {
    pub fn new(latest: impl Into<String>, checked_at: DateTime<Utc>) -> Self {
        Self {
            last_update: checked_at.timestamp_millis(),
            latest: latest.into(),
        }
    }

    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.last_update).single()
    }

    /// Whether the cached value can be used instead of asking the registry
    pub fn is_fresh(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        let Some(checked_at) = self.checked_at() else {
            return false;
        };
        let Ok(interval) = chrono::Duration::from_std(interval) else {
            return false;
        };
        checked_at <= now && now - checked_at < interval
    }
}
