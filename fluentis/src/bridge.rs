//! Bridging awaitables into blocking, synchronous execution.

use crate::task::TaskError;
use crate::task::core::{Continuation, RawTask};

use std::future::Future;
use std::sync::{Arc, Condvar, Mutex};

/// One-shot wait/notify event.
///
/// Single producer, single consumer: the driver task signals it once on
/// completion and the bridged thread blocks until then.
struct WaitEvent {
    done: Mutex<bool>,
    condvar: Condvar,
}

impl WaitEvent {
    fn new() -> Self {
        Self {
            done: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    fn notify(&self) {
        *self.done.lock().unwrap() = true;
        self.condvar.notify_one();
    }

    fn wait(&self) {
        let mut done = self.done.lock().unwrap();

        while !*done {
            done = self.condvar.wait(done).unwrap();
        }
    }
}

/// Runs an awaitable to completion, blocking the calling thread until its
/// outcome is available.
///
/// The awaitable is wrapped in a driver task whose completion signals a
/// one-shot event. The driver's first slice runs on the calling thread;
/// after a [`schedule_on`](crate::executor::schedule_on) hop, later
/// slices run on that executor while the calling thread stays parked on
/// the event. On wake the driver's outcome is returned here, on the
/// original thread.
///
/// This is the only place in the runtime that parks an OS thread;
/// everywhere else, waiting means suspending a task.
///
/// A panic in the awaitable surfaces as [`TaskError::Panicked`]; a driver
/// abandoned by a shut-down executor surfaces as
/// [`TaskError::BrokenPromise`].
pub fn sync_wait<F>(future: F) -> Result<F::Output, TaskError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let event = Arc::new(WaitEvent::new());
    let driver = RawTask::new(future);

    let signal = event.clone();
    driver.set_continuation(Continuation::Signal(Box::new(move || signal.notify())));

    driver.clone().start();
    event.wait();

    driver.slot.take()
}
