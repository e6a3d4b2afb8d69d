//! # Configuration
//!
//! Where the data file lives and how strict account validation is.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DEALER_DATA_PATH=/srv/dealer/data_store.json                       │
//! │     DEALER_PASSWORD_MIN_LEN=10                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or the platform config directory:                   │
//! │     ~/.config/dealer-records/dealer.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     data_store.json in the working directory, password length 8        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! data_path = "data_store.json"
//! pretty = true
//!
//! [validation]
//! password_min_len = 8
//! phone_min_len = 7
//! phone_max_len = 12
//!
//! [reporting]
//! top_n = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use dealer_core::ValidationPolicy;

use crate::error::{StoreError, StoreResult};

/// Default backing file name.
pub const DEFAULT_DATA_FILE: &str = "data_store.json";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "dealer.toml";

// =============================================================================
// Store Configuration
// =============================================================================

/// Record store configuration.
///
/// ## Example
/// ```rust
/// use dealer_store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/dealer/data_store.json").pretty(false);
/// assert!(!config.pretty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON backing file. Created on first open if absent.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Indent the written JSON.
    /// Default: true (the file is meant to be readable by hand)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_true() -> bool {
    true
}

impl StoreConfig {
    /// Creates a store configuration for the given backing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_path: path.into(),
            pretty: true,
        }
    }

    /// Sets whether the JSON is indented.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(default_data_path())
    }
}

// =============================================================================
// Reporting Settings
// =============================================================================

/// Reporting defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// How many accounts `top_accounts_by_points` returns by default.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    5
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            top_n: default_top_n(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub validation: ValidationPolicy,

    #[serde(default)]
    pub reporting: ReportSettings,
}

impl DealerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`dealer.toml`); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading configuration from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML configuration file without applying overrides.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `DEALER_*` overrides read through `lookup`.
    ///
    /// Unparsable numeric overrides are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("DEALER_DATA_PATH") {
            debug!(%path, "Data path overridden from environment");
            self.store.data_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("DEALER_PASSWORD_MIN_LEN") {
            match raw.trim().parse::<usize>() {
                Ok(len) => self.validation.password_min_len = len,
                Err(_) => warn!(value = %raw, "Ignoring invalid DEALER_PASSWORD_MIN_LEN"),
            }
        }
    }

    /// Rejects settings the services cannot work with.
    pub fn validate(&self) -> StoreResult<()> {
        if self.store.data_path.as_os_str().is_empty() {
            return Err(StoreError::Config("store.data_path must not be empty".to_string()));
        }

        let v = &self.validation;
        if v.password_min_len == 0 {
            return Err(StoreError::Config(
                "validation.password_min_len must be at least 1".to_string(),
            ));
        }
        if v.phone_min_len > v.phone_max_len {
            return Err(StoreError::Config(format!(
                "validation.phone_min_len ({}) exceeds phone_max_len ({})",
                v.phone_min_len, v.phone_max_len
            )));
        }

        Ok(())
    }

    /// Platform config path, e.g. `~/.config/dealer-records/dealer.toml`.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dealer", "dealer-records")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
