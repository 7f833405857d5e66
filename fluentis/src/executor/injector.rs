use crate::executor::Work;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Shared work queue feeding a pool's worker threads.
///
/// Workers steal from the front; idle workers park on the condvar until
/// new work arrives or the pool shuts down.
pub(crate) struct Injector {
    queue: Mutex<VecDeque<Work>>,
    parked: Mutex<usize>,
    condvar: Condvar,
    shutdown: AtomicBool,
}

impl Injector {
    pub(crate) fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            parked: Mutex::new(0),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Signals shutdown and discards all still-queued work.
    ///
    /// Discarded run slices abandon their tasks, so observers see a broken
    /// promise instead of hanging.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);

        let drained: Vec<Work> = {
            let mut queue = self.queue.lock().unwrap();
            queue.drain(..).collect()
        };
        // Dropped outside the lock: abandonment callbacks may post again.
        drop(drained);

        self.condvar.notify_all();
    }

    /// Enqueues work, or drops it immediately after shutdown.
    pub(crate) fn push(&self, work: Work) {
        if self.shutdown.load(Ordering::Acquire) {
            return;
        }

        self.queue.lock().unwrap().push_back(work);
        self.condvar.notify_all();
    }

    /// Parks the calling worker until work may be available.
    pub(crate) fn park(&self) {
        if self.shutdown.load(Ordering::Acquire) {
            return;
        }

        if !self.queue.lock().unwrap().is_empty() {
            return;
        }

        let mut parked = self.parked.lock().unwrap();
        *parked += 1;

        let _ = self
            .condvar
            .wait_timeout(parked, Duration::from_millis(1))
            .unwrap();
    }

    pub(crate) fn steal(&self) -> Option<Work> {
        self.queue.lock().unwrap().pop_front()
    }
}
