//! A [`FileWatcher`] that detects changes by rescanning on a timer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Executor (schedule_with_fixed_delay)                         │
//! │   scan_all ─► for each root, under the registry lock:        │
//! │                 FsEntry::scan ─► diff::compare ─► enqueue    │
//! └───────────────────────────────────────────┬──────────────────┘
//!                                             │ schedule_drain
//!                                             ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Executor (execute)                                           │
//! │   drain ─► every listener, one event at a time, FIFO         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Roots registered while stopped are stored as [`FsEntry::Unscanned`], and
//! the first scan after [`FileWatcher::start`] reports everything found
//! under them as created. Roots registered while running are scanned
//! immediately and only later changes are reported.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use pw_core::Config;
use pw_path::LocalPath;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::diff;
use crate::dispatch::{EventDispatcher, Listener};
use crate::entry::FsEntry;
use crate::error::WatchError;
use crate::events::{EventBatch, EventBatchStats};
use crate::executor::{Executor, RecurringTask, ScheduleHandle};
use crate::watcher::FileWatcher;

/// A polling file watcher.
///
/// Every `interval` the watcher rescans each registered root, diffs the new
/// snapshot against the previous one and delivers the resulting events to
/// the subscribed listeners.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use pw_path::LocalPath;
/// use pw_watcher::{FileWatcher, Listener, PollingFileWatcher, TokioExecutor};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let executor = Arc::new(TokioExecutor::current()?);
///     let watcher = PollingFileWatcher::new(executor, 500)?;
///
///     watcher.subscribe(&Listener::new(|event| eprintln!("{event}")));
///     watcher.watch(&LocalPath::parse("./data")?)?;
///     watcher.start()?;
///
///     tokio::signal::ctrl_c().await?;
///     watcher.stop();
///     Ok(())
/// }
/// ```
pub struct PollingFileWatcher {
    inner: Arc<Inner>,
}

struct Inner {
    executor: Arc<dyn Executor>,
    interval: Duration,
    /// Snapshots keyed by the root's absolute, normalized path.
    roots: Mutex<FxHashMap<String, FsEntry>>,
    dispatcher: Arc<EventDispatcher>,
    schedule: Mutex<Option<ScheduleHandle>>,
}

impl PollingFileWatcher {
    /// Creates a stopped watcher that polls every `interval_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidInterval`] if `interval_ms` is zero.
    pub fn new(executor: Arc<dyn Executor>, interval_ms: u64) -> Result<Self, WatchError> {
        if interval_ms == 0 {
            return Err(WatchError::InvalidInterval(interval_ms));
        }
        let dispatcher = Arc::new(EventDispatcher::new(Arc::clone(&executor)));
        Ok(Self {
            inner: Arc::new(Inner {
                executor,
                interval: Duration::from_millis(interval_ms),
                roots: Mutex::new(FxHashMap::default()),
                dispatcher,
                schedule: Mutex::new(None),
            }),
        })
    }

    /// Creates a stopped watcher from `config` and registers its paths.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Config`] if the configuration is invalid, or
    /// [`WatchError::Path`] if a configured path cannot be registered.
    pub fn from_config(executor: Arc<dyn Executor>, config: &Config) -> Result<Self, WatchError> {
        config.validate()?;
        let watcher = Self::new(executor, config.watch.poll_interval_ms)?;
        for path in &config.watch.paths {
            watcher.watch(&LocalPath::try_from(path.as_path())?)?;
        }
        Ok(watcher)
    }

    /// Returns the delay between the end of one scan and the next.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Returns `true` while periodic scanning is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.schedule.lock().is_some()
    }

    /// Returns the registered roots in sorted order.
    #[must_use]
    pub fn watched_paths(&self) -> Vec<LocalPath> {
        let mut paths: Vec<LocalPath> = self
            .inner
            .roots
            .lock()
            .values()
            .map(|entry| entry.path().clone())
            .collect();
        paths.sort();
        paths
    }

    /// Runs one scan tick immediately and returns what it found.
    ///
    /// This is the same work the schedule performs on every tick.
    pub fn scan_all(&self) -> EventBatchStats {
        self.inner.scan_all()
    }
}

impl Inner {
    fn scan_all(&self) -> EventBatchStats {
        let keys: Vec<String> = self.roots.lock().keys().cloned().collect();
        let mut stats = EventBatchStats::default();

        for key in &keys {
            let needs_drain = {
                let mut roots = self.roots.lock();
                // unwatched since the keys were collected
                let Some(previous) = roots.get(key) else {
                    continue;
                };
                let current = FsEntry::scan(previous.path(), Some(previous));
                let mut batch = EventBatch::new();
                diff::compare(previous, &current, &mut batch);
                stats.record(&batch);
                roots.insert(key.clone(), current);
                self.dispatcher.enqueue(batch)
            };
            if needs_drain {
                self.dispatcher.schedule_drain();
            }
        }

        debug!(
            roots = keys.len(),
            events = stats.total,
            created = stats.created,
            deleted = stats.deleted,
            modified = stats.modified,
            "scan complete"
        );
        stats
    }
}

impl FileWatcher for PollingFileWatcher {
    fn watch(&self, path: &LocalPath) -> Result<(), WatchError> {
        let path = path.absolute_path()?;
        let running = self.is_running();
        let mut roots = self.inner.roots.lock();
        if roots.contains_key(path.as_str()) {
            return Ok(());
        }

        let unscanned = FsEntry::Unscanned(path.clone());
        let entry = if running {
            FsEntry::scan(&path, Some(&unscanned))
        } else {
            unscanned
        };
        roots.insert(path.as_str().to_owned(), entry);
        info!(path = %path, "watching");
        Ok(())
    }

    fn unwatch(&self, path: &LocalPath) -> Result<(), WatchError> {
        let path = path.absolute_path()?;
        if self.inner.roots.lock().remove(path.as_str()).is_some() {
            info!(path = %path, "unwatched");
        }
        Ok(())
    }

    fn subscribe(&self, listener: &Listener) -> bool {
        self.inner.dispatcher.subscribe(listener)
    }

    fn unsubscribe(&self, listener: &Listener) -> bool {
        self.inner.dispatcher.unsubscribe(listener)
    }

    fn start(&self) -> Result<(), WatchError> {
        let mut schedule = self.inner.schedule.lock();
        if schedule.is_some() {
            return Ok(());
        }

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let task: RecurringTask = Arc::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.scan_all();
            }
        });
        let handle =
            self.inner
                .executor
                .schedule_with_fixed_delay(task, Duration::ZERO, self.inner.interval)?;
        *schedule = Some(handle);

        info!(interval = ?self.inner.interval, "polling watcher started");
        Ok(())
    }

    fn stop(&self) {
        if let Some(handle) = self.inner.schedule.lock().take() {
            handle.cancel();
            info!("polling watcher stopped");
        }
    }
}

impl Drop for PollingFileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PollingFileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingFileWatcher")
            .field("interval", &self.inner.interval)
            .field("roots", &self.inner.roots.lock().len())
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{RecurringTask, Task};

    #[derive(Default)]
    struct RecordingExecutor {
        scheduled: Mutex<Vec<Duration>>,
    }

    impl Executor for RecordingExecutor {
        fn execute(&self, task: Task) {
            task();
        }

        fn schedule_with_fixed_delay(
            &self,
            _task: RecurringTask,
            _initial_delay: Duration,
            delay: Duration,
        ) -> Result<ScheduleHandle, WatchError> {
            self.scheduled.lock().push(delay);
            Ok(ScheduleHandle::new())
        }
    }

    struct FailingExecutor;

    impl Executor for FailingExecutor {
        fn execute(&self, task: Task) {
            task();
        }

        fn schedule_with_fixed_delay(
            &self,
            _task: RecurringTask,
            _initial_delay: Duration,
            _delay: Duration,
        ) -> Result<ScheduleHandle, WatchError> {
            Err(WatchError::Executor("shut down".to_owned()))
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = PollingFileWatcher::new(Arc::new(RecordingExecutor::default()), 0).unwrap_err();
        assert!(matches!(err, WatchError::InvalidInterval(0)));
    }

    #[test]
    fn test_start_is_idempotent() {
        let executor = Arc::new(RecordingExecutor::default());
        let watcher = PollingFileWatcher::new(Arc::clone(&executor) as Arc<dyn Executor>, 250).unwrap();

        assert!(!watcher.is_running());
        watcher.start().unwrap();
        watcher.start().unwrap();
        assert!(watcher.is_running());
        assert_eq!(*executor.scheduled.lock(), [Duration::from_millis(250)]);

        watcher.stop();
        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_start_propagates_executor_failure() {
        let watcher = PollingFileWatcher::new(Arc::new(FailingExecutor), 10).unwrap();
        let err = watcher.start().unwrap_err();
        assert!(matches!(err, WatchError::Executor(_)));
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_watch_registers_absolute_normalized_path() {
        let watcher = PollingFileWatcher::new(Arc::new(RecordingExecutor::default()), 10).unwrap();
        let relative = LocalPath::parse("some/./nested/../dir").unwrap();

        watcher.watch(&relative).unwrap();
        watcher.watch(&relative).unwrap();

        let paths = watcher.watched_paths();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_absolute());
        assert_eq!(paths[0].filename(), "dir");

        watcher.unwatch(&LocalPath::parse("some/dir").unwrap()).unwrap();
        assert!(watcher.watched_paths().is_empty());
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::json!({
            "watch": {
                "poll_interval_ms": 40,
                "paths": [dir.path().to_str().unwrap()],
            }
        })
        .to_string();
        let config = Config::from_json_str(&json).unwrap();

        let watcher =
            PollingFileWatcher::from_config(Arc::new(RecordingExecutor::default()), &config).unwrap();
        assert_eq!(watcher.interval(), Duration::from_millis(40));
        assert_eq!(watcher.watched_paths().len(), 1);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = Config::from_json_str(r#"{"watch": {"poll_interval_ms": 0}}"#).unwrap();
        let err =
            PollingFileWatcher::from_config(Arc::new(RecordingExecutor::default()), &config).unwrap_err();
        assert!(matches!(err, WatchError::Config(_)));
    }
}
