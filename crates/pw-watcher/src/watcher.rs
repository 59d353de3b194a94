//! The watcher interface.

use pw_path::LocalPath;

use crate::dispatch::Listener;
use crate::error::WatchError;

/// Watches registered paths and notifies listeners of changes.
///
/// Registrations and subscriptions survive [`FileWatcher::stop`], so a
/// stopped watcher resumes where it left off on the next
/// [`FileWatcher::start`].
pub trait FileWatcher: Send + Sync {
    /// Registers `path` (a file or a directory tree) for watching.
    ///
    /// Watching a path that is already registered does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Path`] if the path cannot be made absolute.
    fn watch(&self, path: &LocalPath) -> Result<(), WatchError>;

    /// Removes `path` from the watch set.
    ///
    /// Unwatching a path that is not registered does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Path`] if the path cannot be made absolute.
    fn unwatch(&self, path: &LocalPath) -> Result<(), WatchError>;

    /// Adds a listener. Returns `false` if it was already subscribed.
    fn subscribe(&self, listener: &Listener) -> bool;

    /// Removes a listener. Returns `false` if it was not subscribed.
    fn unsubscribe(&self, listener: &Listener) -> bool;

    /// Begins periodic scanning. Starting a running watcher does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Executor`] if the scan cannot be scheduled.
    fn start(&self) -> Result<(), WatchError>;

    /// Stops periodic scanning. Stopping a stopped watcher does nothing.
    fn stop(&self);
}
