//! Shared fixtures for the watcher integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pw_path::LocalPath;
use pw_watcher::{
    Executor, FileSystemEvent, FileWatcher, Listener, PollingFileWatcher, RecurringTask,
    ScheduleHandle, Task, WatchError,
};

/// Runs one-shot tasks inline and scheduled tasks only when ticked.
#[derive(Default)]
pub struct ManualExecutor {
    scheduled: Mutex<Vec<(RecurringTask, ScheduleHandle)>>,
}

impl ManualExecutor {
    /// Runs every live scheduled task once.
    pub fn tick(&self) {
        let live: Vec<RecurringTask> = self
            .scheduled
            .lock()
            .iter()
            .filter(|(_, handle)| !handle.is_cancelled())
            .map(|(task, _)| Arc::clone(task))
            .collect();
        for task in live {
            task();
        }
    }
}

impl Executor for ManualExecutor {
    fn execute(&self, task: Task) {
        task();
    }

    fn schedule_with_fixed_delay(
        &self,
        task: RecurringTask,
        _initial_delay: Duration,
        _delay: Duration,
    ) -> Result<ScheduleHandle, WatchError> {
        let handle = ScheduleHandle::new();
        self.scheduled.lock().push((task, handle.clone()));
        Ok(handle)
    }
}

/// A watcher on a manual executor with one recording listener attached.
pub struct Harness {
    pub executor: Arc<ManualExecutor>,
    pub watcher: PollingFileWatcher,
    pub listener: Listener,
    events: Arc<Mutex<Vec<FileSystemEvent>>>,
}

impl Harness {
    pub fn new() -> Self {
        let executor = Arc::new(ManualExecutor::default());
        let watcher =
            PollingFileWatcher::new(Arc::clone(&executor) as Arc<dyn Executor>, 100).unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let listener = Listener::new(move |event| sink.lock().push(event.clone()));
        assert!(watcher.subscribe(&listener));
        Self {
            executor,
            watcher,
            listener,
            events,
        }
    }

    /// Runs one scheduled scan tick and returns the events it delivered.
    pub fn tick(&self) -> Vec<FileSystemEvent> {
        self.executor.tick();
        std::mem::take(&mut *self.events.lock())
    }

    /// Like [`Harness::tick`] but without directory attribute changes, whose
    /// timing depends on the file system's timestamp resolution.
    pub fn tick_changes(&self) -> Vec<FileSystemEvent> {
        self.tick()
            .into_iter()
            .filter(|e| !matches!(e, FileSystemEvent::DirModified { .. }))
            .collect()
    }
}

pub fn local(p: &Path) -> LocalPath {
    LocalPath::parse(p.to_str().unwrap()).unwrap()
}
