use crate::context::current_task;
use crate::executor::Executor;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Returns an awaitable that suspends the caller and resumes it on a
/// worker thread of `executor`.
///
/// This is the runtime's sole "hop to a different execution context"
/// primitive. It always suspends, its only side effect is arranging the
/// resumption, and it never fails.
///
/// When awaited inside a task driven by the runtime, the whole task is
/// rebound: every later resumption is posted to the target executor until
/// the next hop. When polled outside any driven task, only a one-shot
/// wake-up is posted and the caller resumes wherever its own driver runs.
pub fn schedule_on(executor: Arc<dyn Executor>) -> ScheduleOn {
    ScheduleOn {
        executor: Some(executor),
    }
}

/// Awaitable returned by [`schedule_on`].
pub struct ScheduleOn {
    executor: Option<Arc<dyn Executor>>,
}

impl Future for ScheduleOn {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        match this.executor.take() {
            Some(target) => {
                match current_task() {
                    Some(scheduler) => {
                        // Rebind the running task, then ask for another
                        // slice; the requeue lands on the new executor.
                        *scheduler.lock().unwrap() = Some(target);
                        cx.waker().wake_by_ref();
                    }
                    None => {
                        let waker = cx.waker().clone();
                        target.post(Box::new(move || waker.wake()));
                    }
                }

                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}
