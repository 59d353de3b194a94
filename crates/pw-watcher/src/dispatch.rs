//! Listener registration and ordered event delivery.

use std::collections::VecDeque;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{trace, warn};

use crate::events::{EventBatch, FileSystemEvent};
use crate::executor::Executor;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A callback that receives file system events.
///
/// Each listener has a unique identity: clones of a listener are the same
/// listener for [`FileWatcher::subscribe`](crate::FileWatcher::subscribe)
/// and [`FileWatcher::unsubscribe`](crate::FileWatcher::unsubscribe).
///
/// # Examples
///
/// ```
/// use pw_watcher::Listener;
///
/// let listener = Listener::new(|event| eprintln!("{event}"));
/// assert_eq!(listener, listener.clone());
/// assert_ne!(listener, Listener::new(|_| {}));
/// ```
#[derive(Clone)]
pub struct Listener {
    id: u64,
    callback: Arc<dyn Fn(&FileSystemEvent) + Send + Sync>,
}

impl Listener {
    /// Wraps `callback` in a new listener.
    pub fn new(callback: impl Fn(&FileSystemEvent) + Send + Sync + 'static) -> Self {
        Self {
            id: NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed),
            callback: Arc::new(callback),
        }
    }

    /// Returns the listener's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    fn notify(&self, event: &FileSystemEvent) {
        (self.callback)(event);
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish_non_exhaustive()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

#[derive(Debug, Default)]
struct Delivery {
    queue: VecDeque<FileSystemEvent>,
    draining: bool,
}

/// Delivers events to listeners in the order they were enqueued.
///
/// At most one drain task is in flight on the executor at a time, so no two
/// events are ever delivered concurrently and each listener sees events in
/// enqueue order. A listener that panics is logged and skipped; the others
/// still receive the event.
pub(crate) struct EventDispatcher {
    executor: Arc<dyn Executor>,
    listeners: RwLock<Vec<Listener>>,
    delivery: Mutex<Delivery>,
}

impl EventDispatcher {
    pub(crate) fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            listeners: RwLock::new(Vec::new()),
            delivery: Mutex::new(Delivery::default()),
        }
    }

    pub(crate) fn subscribe(&self, listener: &Listener) -> bool {
        let mut listeners = self.listeners.write();
        if listeners.contains(listener) {
            return false;
        }
        listeners.push(listener.clone());
        true
    }

    pub(crate) fn unsubscribe(&self, listener: &Listener) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| l != listener);
        listeners.len() != before
    }

    /// Queues `batch` for delivery.
    ///
    /// Returns `true` when the caller must call
    /// [`EventDispatcher::schedule_drain`] once it has released its own
    /// locks.
    pub(crate) fn enqueue(&self, batch: EventBatch) -> bool {
        if batch.is_empty() {
            return false;
        }
        let mut delivery = self.delivery.lock();
        delivery.queue.extend(batch);
        !std::mem::replace(&mut delivery.draining, true)
    }

    pub(crate) fn schedule_drain(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.executor.execute(Box::new(move || this.drain()));
    }

    #[cfg(test)]
    pub(crate) fn fire(self: &Arc<Self>, batch: EventBatch) {
        if self.enqueue(batch) {
            self.schedule_drain();
        }
    }

    fn drain(&self) {
        loop {
            let event = {
                let mut delivery = self.delivery.lock();
                match delivery.queue.pop_front() {
                    Some(event) => event,
                    None => {
                        delivery.draining = false;
                        return;
                    }
                }
            };

            let listeners = self.listeners.read().clone();
            trace!(event = %event, listeners = listeners.len(), "delivering event");
            for listener in &listeners {
                if catch_unwind(AssertUnwindSafe(|| listener.notify(&event))).is_err() {
                    warn!(listener = listener.id(), event = %event, "listener panicked");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pw_path::LocalPath;

    use super::*;
    use crate::error::WatchError;
    use crate::executor::{RecurringTask, ScheduleHandle, Task};

    struct InlineExecutor;

    impl Executor for InlineExecutor {
        fn execute(&self, task: Task) {
            task();
        }

        fn schedule_with_fixed_delay(
            &self,
            _task: RecurringTask,
            _initial_delay: Duration,
            _delay: Duration,
        ) -> Result<ScheduleHandle, WatchError> {
            Ok(ScheduleHandle::new())
        }
    }

    fn dispatcher() -> Arc<EventDispatcher> {
        Arc::new(EventDispatcher::new(Arc::new(InlineExecutor)))
    }

    fn created(name: &str) -> FileSystemEvent {
        FileSystemEvent::FileCreated {
            path: LocalPath::parse(name).unwrap(),
        }
    }

    fn recorder() -> (Listener, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = Listener::new(move |event| sink.lock().push(event.path().to_string()));
        (listener, seen)
    }

    #[test]
    fn test_subscribe_once() {
        let dispatcher = dispatcher();
        let (listener, _) = recorder();

        assert!(dispatcher.subscribe(&listener));
        assert!(!dispatcher.subscribe(&listener.clone()));
        assert!(dispatcher.unsubscribe(&listener));
        assert!(!dispatcher.unsubscribe(&listener));
    }

    #[test]
    fn test_delivery_in_order() {
        let dispatcher = dispatcher();
        let (listener, seen) = recorder();
        dispatcher.subscribe(&listener);

        dispatcher.fire([created("a"), created("b")].into_iter().collect());
        dispatcher.fire(std::iter::once(created("c")).collect());

        assert_eq!(*seen.lock(), ["a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribed_listener_stops_receiving() {
        let dispatcher = dispatcher();
        let (listener, seen) = recorder();
        dispatcher.subscribe(&listener);
        dispatcher.fire(std::iter::once(created("a")).collect());
        dispatcher.unsubscribe(&listener);
        dispatcher.fire(std::iter::once(created("b")).collect());

        assert_eq!(*seen.lock(), ["a"]);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let dispatcher = dispatcher();
        let panicking = Listener::new(|_| panic!("listener failure"));
        let (listener, seen) = recorder();
        dispatcher.subscribe(&panicking);
        dispatcher.subscribe(&listener);

        dispatcher.fire([created("a"), created("b")].into_iter().collect());

        assert_eq!(*seen.lock(), ["a", "b"]);
    }

    #[test]
    fn test_empty_batch_schedules_nothing() {
        let dispatcher = dispatcher();
        assert!(!dispatcher.enqueue(EventBatch::new()));
        assert!(dispatcher.enqueue(std::iter::once(created("a")).collect()));
        // a drain is pending, so further batches piggyback on it
        assert!(!dispatcher.enqueue(std::iter::once(created("b")).collect()));
    }
}
