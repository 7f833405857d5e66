use crate::executor::Executor;

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

/// Shared, swappable scheduler binding of a task.
///
/// `None` means resumptions run directly on the waking thread;
/// `Some(executor)` means each resumption is posted to that executor.
pub(crate) type SchedulerCell = Arc<Mutex<Option<Arc<dyn Executor>>>>;

thread_local! {
    /// Scheduler binding of the task currently being polled on this thread.
    ///
    /// Installed for the duration of each run slice so that suspension
    /// points (notably `schedule_on`) can rebind the enclosing task
    /// without explicit parameter passing.
    pub(crate) static CURRENT_TASK: RefCell<Option<SchedulerCell>> =
        const { RefCell::new(None) };
}

/// Enters a task's execution context for the current thread.
///
/// Temporarily installs the task's scheduler cell for the duration of
/// the closure `f`, restoring the previous context afterwards.
pub(crate) fn enter_task<R>(cell: SchedulerCell, f: impl FnOnce() -> R) -> R {
    CURRENT_TASK.with(|current| {
        let prev = current.replace(Some(cell));
        let out = f();

        current.replace(prev);

        out
    })
}

/// Returns the scheduler cell of the task being polled on this thread,
/// if any.
pub(crate) fn current_task() -> Option<SchedulerCell> {
    CURRENT_TASK.with(|current| current.borrow().clone())
}
