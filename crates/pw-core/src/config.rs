//! Configuration structures for pathwatch.
//!
//! - [`WatchConfig`] - Polling watcher settings (interval, initial roots)
//! - [`PathConfig`] - Path parsing and display settings
//! - [`LogConfig`] - Log output settings
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section is `#[serde(default)]`, so a configuration file only needs
//! to name the options it changes.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default poll interval of the watcher in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Configuration for the polling file watcher.
///
/// # Examples
///
/// ```
/// use pw_core::WatchConfig;
/// use std::time::Duration;
///
/// let config = WatchConfig::default();
/// assert_eq!(config.poll_interval(), Duration::from_secs(1));
/// assert!(config.paths.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Delay between the end of one scan and the start of the next.
    pub poll_interval_ms: u64,

    /// Roots to watch on startup.
    pub paths: Vec<Utf8PathBuf>,
}

impl WatchConfig {
    /// Returns the poll interval as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            paths: Vec::new(),
        }
    }
}

/// Configuration for path parsing and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Trim whitespace around each path segment while parsing.
    pub trim_whitespace: bool,

    /// Marker spliced into shortened paths.
    pub ellipsis: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            ellipsis: "...".to_owned(),
        }
    }
}

/// Configuration for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log at debug level instead of info.
    pub verbose: bool,

    /// Emit ANSI colors.
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
        }
    }
}

/// Root configuration for pathwatch.
///
/// # Examples
///
/// ```
/// use pw_core::Config;
///
/// let config = Config::from_json_str(r#"{"watch": {"poll_interval_ms": 250}}"#)?;
/// assert_eq!(config.watch.poll_interval_ms, 250);
/// assert_eq!(config.path.ellipsis, "...");
/// # Ok::<(), pw_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Watcher configuration.
    pub watch: WatchConfig,

    /// Path configuration.
    pub path: PathConfig,

    /// Log configuration.
    pub log: LogConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks option values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watch.poll_interval_ms == 0 {
            return Err(ConfigError::invalid_option(
                "watch.poll_interval_ms",
                "must be at least 1",
            ));
        }
        if self.path.ellipsis.is_empty() {
            return Err(ConfigError::invalid_option(
                "path.ellipsis",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
