//! Settings type definitions.
//!
//! All types use camelCase field names in JSON and implement [`Default`]
//! with production values. `#[serde(default)]` allows partial JSON: missing
//! fields fall back to their defaults during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings for the lookout dashboard client.
///
/// Loaded from `~/.lookout/settings.json` with defaults applied for missing
/// fields. Example:
///
/// ```json
/// {
///   "backend": { "baseUrl": "http://192.168.1.20:5000" },
///   "sync": { "statsIntervalSecs": 60 }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookoutSettings {
    /// Monitoring backend connection.
    pub backend: BackendSettings,
    /// Refresh cadence and delays.
    pub sync: SyncSettings,
    /// Log output configuration.
    pub telemetry: TelemetrySettings,
}

/// Where and how to reach the monitoring backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendSettings {
    /// Base URL of the backend API.
    pub base_url: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Refresh cadence and post-fetch settle delay.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Seconds between background statistics refreshes.
    pub stats_interval_secs: u64,
    /// Milliseconds to wait after a fetch job before reloading.
    pub settle_delay_ms: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            stats_interval_secs: 30,
            settle_delay_ms: 500,
        }
    }
}

/// Log output configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetrySettings {
    /// Mirror logs into a queryable SQLite database.
    pub log_to_sqlite: bool,
    /// Path to the log database (relative to `~/.lookout`).
    pub log_db_path: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_to_sqlite: true,
            log_db_path: "logs.db".to_string(),
        }
    }
}
