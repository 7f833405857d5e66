use crate::executor::Executor;
use crate::task::TaskError;
use crate::task::core::RawTask;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A lazily started asynchronous computation.
///
/// A `Task` owns a suspended frame and the result slot that will receive
/// its outcome. The handle is move-only; ownership transfers, never
/// duplicates. Nothing runs until the task is either awaited (which
/// drives the frame inline on the awaiting context) or handed to an
/// executor with [`start_on`](Self::start_on).
///
/// A task that is dropped without ever being driven never executes its
/// body.
pub struct Task<T> {
    pub(crate) raw: Arc<RawTask<T>>,
}

impl<T: Send + 'static> Task<T> {
    /// Wraps a future as a lazy task.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            raw: RawTask::new(future),
        }
    }

    /// Binds the task to an executor and schedules its first run.
    ///
    /// Consumes the handle; completion is observed through the returned
    /// [`JoinHandle`], possibly from a different thread than the one the
    /// task runs on.
    pub fn start_on(self, executor: Arc<dyn Executor>) -> JoinHandle<T> {
        self.raw.bind(executor);
        self.raw.clone().start();

        JoinHandle { raw: self.raw }
    }
}

impl<T: Send + 'static> Future for Task<T> {
    type Output = T;

    /// Drives the frame inline on the awaiting context.
    ///
    /// The handle is move-only and was never started, so it is the frame's
    /// sole driver. A panic in the body propagates straight to the awaiter.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        self.get_mut().raw.poll_inline(cx)
    }
}

/// A handle observing a started task.
///
/// `JoinHandle` resolves once the task has completed, yielding its value
/// or the failure captured in its result slot. Dropping the handle does
/// **not** cancel the task; it only discards the ability to observe its
/// outcome.
pub struct JoinHandle<T> {
    pub(crate) raw: Arc<RawTask<T>>,
}

impl<T: Send + 'static> JoinHandle<T> {
    /// Returns `true` once the task has produced its outcome. Never blocks.
    pub fn is_finished(&self) -> bool {
        self.raw.is_complete()
    }
}

impl<T: Send + 'static> Future for JoinHandle<T> {
    type Output = Result<T, TaskError>;

    /// Polls the join handle.
    ///
    /// The waker is registered **before** re-checking the task state to
    /// avoid missed wake-ups.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.raw.is_complete() {
            return Poll::Ready(self.raw.slot.take());
        }

        self.raw.register_waker(cx.waker());

        if self.raw.is_complete() {
            return Poll::Ready(self.raw.slot.take());
        }

        Poll::Pending
    }
}
