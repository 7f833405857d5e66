//! Fire-and-forget task pool.

use crate::executor::Executor;
use crate::task::Task;
use crate::task::core::{Continuation, RawTask};
use crate::utils::slab::Slab;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Type-erased view of a pooled task, enough to decide whether its entry
/// can be removed.
trait PoolEntry: Send + Sync {
    fn is_finished(&self) -> bool;
}

impl<T: Send> PoolEntry for RawTask<T> {
    fn is_finished(&self) -> bool {
        self.is_complete()
    }
}

/// A growable set of independently spawned fire-and-forget tasks.
///
/// Each pushed task is rewired so that its completion posts a cleanup
/// request back onto the pool's own executor rather than mutating the
/// entry collection from whatever worker thread it completed on. Entries
/// are only ever removed inside such executor-serialized cleanup passes,
/// which is what keeps concurrent push/complete/cleanup safe.
///
/// Dropping the pool does not stop tasks that are already running; they
/// simply lose their pool entry.
pub struct TaskPool {
    /// Executor that runs both the pooled tasks and the cleanup passes.
    executor: Arc<dyn Executor>,

    /// Entry arena. Structurally mutated only from cleanup passes.
    entries: Mutex<Slab<Arc<dyn PoolEntry>>>,

    /// Coalesces cleanup requests: at most one pass is queued at a time.
    cleanup_queued: AtomicBool,

    /// Handle to the pool itself for completion callbacks.
    me: Weak<TaskPool>,
}

impl TaskPool {
    /// Creates a pool that spawns its tasks onto `executor`.
    pub fn new(executor: Arc<dyn Executor>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            executor,
            entries: Mutex::new(Slab::new(0)),
            cleanup_queued: AtomicBool::new(false),
            me: me.clone(),
        })
    }

    /// Takes ownership of a lazy task and schedules it to start on the
    /// pool's executor.
    ///
    /// The task's completion (or abandonment) requests a cleanup pass;
    /// its result is discarded.
    pub fn push<T: Send + 'static>(&self, task: Task<T>) {
        let raw = task.raw;

        let pool = self.me.clone();
        raw.set_continuation(Continuation::Signal(Box::new(move || {
            if let Some(pool) = pool.upgrade() {
                pool.request_cleanup();
            }
        })));

        let entry: Arc<dyn PoolEntry> = raw.clone();
        self.entries.lock().unwrap().insert(entry);

        raw.bind(self.executor.clone());
        raw.start();
    }

    /// Number of entries currently held. Completed tasks linger until a
    /// cleanup pass runs.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Explicitly posts a cleanup pass to the pool's executor.
    ///
    /// The pass removes every completed entry. Incomplete entries are
    /// left untouched.
    pub fn cleanup(&self) {
        self.request_cleanup();
    }

    fn request_cleanup(&self) {
        if self.cleanup_queued.swap(true, Ordering::AcqRel) {
            return;
        }

        let pool = self.me.clone();
        self.executor.post(Box::new(move || {
            if let Some(pool) = pool.upgrade() {
                pool.run_cleanup();
            }
        }));
    }

    /// The only place entries are removed. Runs on the pool's executor.
    fn run_cleanup(&self) {
        // Reset first so completions landing during the pass queue a new
        // one. The swap synchronizes with every completer whose request was
        // coalesced into this pass, so `retain` observes their final state.
        self.cleanup_queued.swap(false, Ordering::AcqRel);

        self.entries
            .lock()
            .unwrap()
            .retain(|entry| !entry.is_finished());
    }
}
