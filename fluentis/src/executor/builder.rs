use crate::executor::ThreadPool;

use std::thread;

/// Builder for [`ThreadPool`].
///
/// Defaults to one worker per available CPU.
pub struct ThreadPoolBuilder {
    worker_threads: usize,
}

impl ThreadPoolBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        let worker_threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self { worker_threads }
    }

    /// Overrides the number of worker threads.
    pub fn worker_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "worker_threads must be > 0");

        self.worker_threads = n;
        self
    }

    /// Builds the pool and spawns its worker threads.
    pub fn build(self) -> ThreadPool {
        ThreadPool::new(self.worker_threads)
    }
}

impl Default for ThreadPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
