//! Runtime configuration for the ordering services.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.
//!
//! # Examples
//!
//! ```
//! use orderline::config::OrderingConfig;
//!
//! let config = OrderingConfig::from_json_str(r#"{"polling": {"kitchen_interval_ms": 1000}}"#)
//!     .expect("valid configuration");
//! assert_eq!(config.polling.kitchen_interval_ms, 1000);
//! assert_eq!(config.polling.cashier_interval_ms, 5000);
//! assert!(!config.kitchen.require_settled_payment);
//! ```

use crate::order::services::KitchenPolicy;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Kitchen admission rules.
    pub kitchen: KitchenPolicy,
    /// Refresh intervals for the cashier and kitchen views.
    pub polling: PollingConfig,
    /// Report settings.
    pub reporting: ReportingConfig,
}

/// Refresh intervals for polling feeds, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Kitchen queue refresh interval.
    pub kitchen_interval_ms: u64,
    /// Cashier pending-payment list refresh interval.
    pub cashier_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            kitchen_interval_ms: 3_000,
            cashier_interval_ms: 5_000,
        }
    }
}

impl PollingConfig {
    /// Returns the kitchen refresh interval.
    #[must_use]
    pub const fn kitchen_interval(&self) -> Duration {
        Duration::from_millis(self.kitchen_interval_ms)
    }

    /// Returns the cashier refresh interval.
    #[must_use]
    pub const fn cashier_interval(&self) -> Duration {
        Duration::from_millis(self.cashier_interval_ms)
    }
}

/// Report settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Number of best sellers listed in the daily summary.
    pub top_items: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self { top_items: 5 }
    }
}

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration path does not name a file.
    #[error("configuration path '{0}' does not name a file")]
    MissingFileName(Utf8PathBuf),
    /// The configuration is not valid JSON for this schema.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A polling interval is zero.
    #[error("polling interval '{0}' must be greater than zero")]
    ZeroInterval(&'static str),
    /// The best-seller count is zero.
    #[error("reporting.top_items must be greater than zero")]
    ZeroTopItems,
}

impl OrderingConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the errors of
    /// [`OrderingConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFileName`] for directory-like paths,
    /// [`ConfigError::Io`] when the file cannot be read and the errors of
    /// [`OrderingConfig::from_json_str`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let (dir, file_name) = open_parent_dir(path)?;
        let raw = dir.read_to_string(file_name)?;
        Self::from_json_str(&raw)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] or [`ConfigError::ZeroTopItems`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.kitchen_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("kitchen_interval_ms"));
        }
        if self.polling.cashier_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("cashier_interval_ms"));
        }
        if self.reporting.top_items == 0 {
            return Err(ConfigError::ZeroTopItems);
        }
        Ok(())
    }
}

fn open_parent_dir(path: &Utf8Path) -> Result<(Dir, &str), ConfigError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ConfigError::MissingFileName(path.to_owned()))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}
