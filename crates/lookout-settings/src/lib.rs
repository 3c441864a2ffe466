//! # lookout-settings
//!
//! Configuration for the lookout dashboard client.
//!
//! Settings are loaded from three layers, in priority order:
//! 1. Compiled defaults ([`LookoutSettings::default()`])
//! 2. User file at `~/.lookout/settings.json`, deep-merged over defaults
//! 3. `LOOKOUT_*` environment variables (highest priority)
//!
//! The settings value is loaded once at startup and handed to the pieces that
//! need it; there is no global.

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{BackendSettings, LookoutSettings, SyncSettings, TelemetrySettings};
