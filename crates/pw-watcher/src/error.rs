//! Error types for the pw-watcher crate.
//!
//! This module provides the [`WatchError`] type for errors that can occur
//! while configuring, starting or running a watcher.

use pw_core::ConfigError;
use pw_path::PathError;

/// Errors that can occur during file watching operations.
///
/// # Error Recovery Strategy
///
/// - **Invalid interval** ([`WatchError::InvalidInterval`]): Fatal - raised at construction
/// - **Path errors** ([`WatchError::Path`]): Fatal - returned to the caller of `watch`/`unwatch`
/// - **Config errors** ([`WatchError::Config`]): Fatal - configuration must be fixed
/// - **Executor errors** ([`WatchError::Executor`]): Fatal - returned to the caller of `start`
/// - **Scan errors** ([`WatchError::Scan`]): Recoverable - logged, entry retried on the next tick
///
/// # Examples
///
/// ```
/// use pw_watcher::WatchError;
///
/// fn handle_error(err: &WatchError) {
///     if err.is_fatal() {
///         eprintln!("watcher error: {err}");
///     }
/// }
///
/// handle_error(&WatchError::InvalidInterval(0));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The poll interval is below one millisecond.
    #[error("poll interval must be at least 1 ms, got {0} ms")]
    InvalidInterval(u64),

    /// A watch target could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The watcher configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The executor could not schedule the scan task.
    #[error("executor failed to schedule task: {0}")]
    Executor(String),

    /// Reading one entry failed during a scan tick.
    ///
    /// The entry keeps its previous snapshot and is retried on the next tick.
    #[error("failed to scan '{path}': {source}")]
    Scan {
        /// The entry being scanned.
        path: String,
        /// The underlying path error.
        #[source]
        source: PathError,
    },
}

impl WatchError {
    /// Creates a new [`WatchError::Scan`] error.
    #[inline]
    pub fn scan(path: impl Into<String>, source: PathError) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error is recoverable (watching can continue).
    ///
    /// Only per-entry scan failures are recoverable.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Scan { .. })
    }

    /// Returns `true` if this error is fatal.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Scan { path, .. } => Some(path),
            Self::Path(
                PathError::Io { path, .. }
                | PathError::FlavorMismatch { path, .. }
                | PathError::MalformedUnc { path, .. },
            ) => Some(path),
            Self::InvalidInterval(_) | Self::Path(_) | Self::Config(_) | Self::Executor(_) => None,
        }
    }
}
