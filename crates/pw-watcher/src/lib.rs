//! Polling file watcher built on periodic snapshot diffing.
//!
//! This crate detects file system changes by rescanning registered roots on
//! a fixed delay and diffing each new snapshot against the previous one. It
//! needs no platform notification API.
//!
//! # Overview
//!
//! - [`FileWatcher`] is the interface: register roots, subscribe listeners,
//!   start and stop
//! - [`PollingFileWatcher`] implements it by scanning on an [`Executor`]
//! - [`FsEntry`] is one snapshot and [`diff::compare`] turns two snapshots
//!   into [`FileSystemEvent`]s
//! - Listeners receive events one at a time, in the order they were found
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐  schedule_with_fixed_delay  ┌──────────────────┐
//! │ PollingFileWatcher   │ ──────────────────────────► │ Executor         │
//! │  roots: path → FsEntry│                            │ (TokioExecutor)  │
//! └──────────┬───────────┘                             └────────┬─────────┘
//!            │ scan + diff per root                             │ execute
//!            ▼                                                  ▼
//!      EventBatch ──► EventDispatcher queue ──────────► Listener callbacks
//! ```
//!
//! # Crate Dependencies
//!
//! ```text
//! pw-cli ──► pw-watcher ──► pw-path
//!                      └──► pw-core
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pw_path::LocalPath;
//! use pw_watcher::{FileSystemEvent, FileWatcher, Listener, PollingFileWatcher, TokioExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let watcher = PollingFileWatcher::new(Arc::new(TokioExecutor::current()?), 1000)?;
//!
//!     watcher.subscribe(&Listener::new(|event| {
//!         if let FileSystemEvent::FileCreated { path } = event {
//!             eprintln!("new file: {path}");
//!         }
//!     }));
//!     watcher.watch(&LocalPath::parse("/var/spool/incoming")?)?;
//!     watcher.start()?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     watcher.stop();
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Configuration, registration and scheduling failures are returned as
//! [`WatchError`]. Failures while reading a single entry during a tick are
//! logged and the entry keeps its previous snapshot:
//!
//! ```
//! use pw_watcher::WatchError;
//!
//! fn handle_watch_error(err: WatchError) {
//!     if err.is_fatal() {
//!         eprintln!("Fatal watcher error: {err}");
//!     } else {
//!         eprintln!("Warning: {err}");
//!     }
//! }
//! # handle_watch_error(WatchError::InvalidInterval(0));
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod diff;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod events;
pub mod executor;
pub mod polling;
pub mod watcher;

// Re-export error types
pub use error::WatchError;

// Re-export event types
pub use events::{DirAttrs, EventBatch, EventBatchStats, EventKind, FileAttrs, FileSystemEvent};

// Re-export snapshot and dispatch types
pub use dispatch::Listener;
pub use entry::FsEntry;

// Re-export executor types
pub use executor::{Executor, RecurringTask, ScheduleHandle, Task, TokioExecutor};

// Re-export watcher types
pub use polling::PollingFileWatcher;
pub use watcher::FileWatcher;
