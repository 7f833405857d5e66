use crate::executor::injector::Injector;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A worker thread in a [`ThreadPool`](crate::executor::ThreadPool).
///
/// Each worker repeatedly steals work from the shared injector and parks
/// when none is available.
pub(crate) struct Worker {
    injector: Arc<Injector>,
}

impl Worker {
    pub(crate) fn new(injector: Arc<Injector>) -> Self {
        Self { injector }
    }

    /// Runs the worker loop until a shutdown signal is observed.
    pub(crate) fn run(&self, shutdown: Arc<AtomicBool>) {
        loop {
            if shutdown.load(Ordering::Acquire) {
                break;
            }

            if let Some(work) = self.injector.steal() {
                work();
                continue;
            }

            self.injector.park();
        }
    }
}
