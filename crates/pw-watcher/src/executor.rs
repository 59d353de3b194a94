//! Task execution for the watcher.
//!
//! The watcher never spawns threads itself. Scan ticks and event delivery
//! are handed to an [`Executor`], so callers decide where the work runs.
//! [`TokioExecutor`] runs both on a tokio runtime's blocking pool.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::WatchError;

/// A one-shot unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A unit of work run repeatedly by [`Executor::schedule_with_fixed_delay`].
pub type RecurringTask = Arc<dyn Fn() + Send + Sync + 'static>;

/// Runs tasks on behalf of a watcher.
pub trait Executor: Send + Sync + 'static {
    /// Runs `task` once, at some point after this call.
    fn execute(&self, task: Task);

    /// Runs `task` after `initial_delay`, then again `delay` after each run
    /// completes, until the returned handle is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Executor`] if the task cannot be scheduled.
    fn schedule_with_fixed_delay(
        &self,
        task: RecurringTask,
        initial_delay: Duration,
        delay: Duration,
    ) -> Result<ScheduleHandle, WatchError>;
}

/// Cancels a task scheduled with [`Executor::schedule_with_fixed_delay`].
///
/// Cancellation stops future runs. A run already in progress completes.
#[derive(Debug, Clone, Default)]
pub struct ScheduleHandle {
    token: CancellationToken,
}

impl ScheduleHandle {
    /// Creates a handle that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops future runs of the scheduled task.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`ScheduleHandle::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The token executors observe to stop the schedule.
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }
}

/// An [`Executor`] backed by a tokio runtime.
///
/// Tasks run on the runtime's blocking pool since scans do synchronous
/// file system I/O.
///
/// # Examples
///
/// ```
/// use pw_watcher::TokioExecutor;
///
/// let runtime = tokio::runtime::Runtime::new()?;
/// let executor = TokioExecutor::new(runtime.handle().clone());
/// # drop(executor);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    /// Creates an executor that spawns onto `handle`.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates an executor for the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Executor`] when called outside a tokio runtime.
    pub fn current() -> Result<Self, WatchError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| WatchError::Executor(e.to_string()))
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, task: Task) {
        drop(self.handle.spawn_blocking(task));
    }

    fn schedule_with_fixed_delay(
        &self,
        task: RecurringTask,
        initial_delay: Duration,
        delay: Duration,
    ) -> Result<ScheduleHandle, WatchError> {
        let schedule = ScheduleHandle::new();
        let cancelled = schedule.cancellation_token().clone();
        let handle = self.handle.clone();

        self.handle.spawn(async move {
            let mut wait = initial_delay;
            loop {
                tokio::select! {
                    () = cancelled.cancelled() => break,
                    () = tokio::time::sleep(wait) => {}
                }
                let run = Arc::clone(&task);
                if let Err(e) = handle.spawn_blocking(move || run()).await {
                    warn!(error = %e, "scheduled task failed");
                }
                wait = delay;
            }
            debug!("schedule cancelled");
        });

        Ok(schedule)
    }
}
