use crate::executor::injector::Injector;
use crate::executor::worker::Worker;
use crate::executor::{Executor, Work};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Multi-threaded executor backend.
///
/// The `ThreadPool` owns a set of worker threads fed from a shared
/// injector queue. Posted work runs on whichever worker picks it up
/// first; there is no ordering promise between posted items.
///
/// Construct one through [`ThreadPoolBuilder`](crate::ThreadPoolBuilder).
pub struct ThreadPool {
    /// Shared work queue.
    injector: Arc<Injector>,

    /// Join handles for worker threads.
    handles: Vec<thread::JoinHandle<()>>,

    /// Shutdown flag shared with all workers.
    shutdown: Arc<AtomicBool>,
}

impl ThreadPool {
    /// Creates a pool with the given number of worker threads.
    pub(crate) fn new(threads: usize) -> Self {
        let injector = Arc::new(Injector::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(threads);

        for _ in 0..threads {
            let worker = Worker::new(injector.clone());
            let sd = shutdown.clone();

            let handle = thread::spawn(move || {
                worker.run(sd);
            });

            handles.push(handle);
        }

        Self {
            injector,
            handles,
            shutdown,
        }
    }

    /// Signals all workers to shut down and discards still-queued work.
    ///
    /// Tasks whose run slices are discarded surface a broken promise to
    /// their observers. Work posted after shutdown is dropped the same way.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.injector.shutdown();
    }

    /// Waits for all worker threads to terminate.
    fn join(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Executor for ThreadPool {
    fn post(&self, work: Work) {
        self.injector.push(work);
    }
}

impl Drop for ThreadPool {
    /// Shuts the pool down and joins all worker threads.
    fn drop(&mut self) {
        self.shutdown();
        self.join();
    }
}
