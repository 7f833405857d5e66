use crate::context::{SchedulerCell, enter_task};
use crate::executor::Executor;
use crate::task::slot::ResultSlot;
use crate::task::state::{COMPLETED, CREATED, IDLE, NOTIFIED, QUEUED, RUNNING};

use std::cell::UnsafeCell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Wake, Waker};

/// The party resumed or signalled when a task completes.
pub(crate) enum Continuation {
    /// A single registered waker, replaced on every registration.
    Waiter(Option<Waker>),

    /// A callback invoked instead of waking a waker. Used by combinator
    /// operands (coordinator signal) and by the blocking bridge (event
    /// notification).
    Signal(Box<dyn Fn() + Send + Sync>),
}

/// The shared core of an asynchronous task.
///
/// A `RawTask` couples a suspended computation frame with the result slot
/// that will receive its outcome, the lifecycle state driving exactly-once
/// execution slices, a swappable scheduler binding, and the continuation
/// to resume on completion.
pub(crate) struct RawTask<T> {
    /// The suspended computation frame.
    ///
    /// Wrapped in `UnsafeCell` for interior mutability during polling, and
    /// `Pin<Box<...>>` so the frame stays put in memory.
    future: UnsafeCell<Pin<Box<dyn Future<Output = T> + Send>>>,

    /// Outcome storage, written exactly once.
    pub(crate) slot: ResultSlot<T>,

    /// Lifecycle state (`CREATED`, `QUEUED`, `RUNNING`, ...).
    state: AtomicUsize,

    /// Where resumptions are posted. `None` resumes on the waking thread.
    scheduler: SchedulerCell,

    /// At most one continuation is ever registered.
    continuation: Mutex<Continuation>,
}

unsafe impl<T: Send> Send for RawTask<T> {}
unsafe impl<T: Send> Sync for RawTask<T> {}

impl<T> RawTask<T> {
    /// Binds the task to an executor; subsequent run slices are posted there.
    pub(crate) fn bind(&self, executor: Arc<dyn Executor>) {
        *self.scheduler.lock().unwrap() = Some(executor);
    }

    /// Replaces the continuation. Must happen before the task is started.
    pub(crate) fn set_continuation(&self, continuation: Continuation) {
        *self.continuation.lock().unwrap() = continuation;
    }

    /// Registers the waker to resume on completion, replacing any
    /// previously registered one.
    pub(crate) fn register_waker(&self, waker: &Waker) {
        let mut guard = self.continuation.lock().unwrap();
        if let Continuation::Waiter(slot) = &mut *guard {
            *slot = Some(waker.clone());
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.state.load(Ordering::Acquire) == COMPLETED
    }

    /// Resumes or signals the registered continuation exactly once.
    fn notify(&self) {
        let continuation = std::mem::replace(
            &mut *self.continuation.lock().unwrap(),
            Continuation::Waiter(None),
        );

        match continuation {
            Continuation::Waiter(Some(waker)) => waker.wake(),
            Continuation::Waiter(None) => {}
            Continuation::Signal(signal) => signal(),
        }
    }
}

impl<T: Send + 'static> RawTask<T> {
    /// Creates a task core in the `CREATED` state. Nothing runs until
    /// [`start`](Self::start) is called or the frame is polled inline.
    pub(crate) fn new<F>(future: F) -> Arc<Self>
    where
        F: Future<Output = T> + Send + 'static,
    {
        Arc::new(Self {
            future: UnsafeCell::new(Box::pin(future)),
            slot: ResultSlot::new(),
            state: AtomicUsize::new(CREATED),
            scheduler: Arc::new(Mutex::new(None)),
            continuation: Mutex::new(Continuation::Waiter(None)),
        })
    }

    /// Moves the task out of `CREATED` and schedules its first run slice.
    ///
    /// With no scheduler bound the first slice runs on the calling thread.
    pub(crate) fn start(self: Arc<Self>) {
        if self
            .state
            .compare_exchange(CREATED, QUEUED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.schedule();
        }
    }

    /// Hands a run slice to the bound executor, or runs it right here when
    /// the task is unbound.
    fn schedule(self: Arc<Self>) {
        let scheduler = self.scheduler.lock().unwrap().clone();

        match scheduler {
            Some(executor) => {
                let mut job = RunJob { task: Some(self) };
                executor.post(Box::new(move || job.fire()));
            }
            None => self.run(),
        }
    }

    /// Executes one run slice.
    ///
    /// Transitions to `RUNNING`, polls the frame, and handles the result:
    /// - `Poll::Pending`: back to `IDLE`, or re-queued if woken meanwhile.
    /// - `Poll::Ready`: outcome stored, continuation resumed.
    /// - a panic in the frame: payload captured as the slot's failure.
    pub(crate) fn run(self: Arc<Self>) {
        let current = self.state.load(Ordering::Acquire);

        if current != QUEUED && current != NOTIFIED {
            return;
        }

        // Transition to RUNNING. This ensures exclusive access to the frame.
        if self
            .state
            .compare_exchange(current, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let waker = Waker::from(self.clone());
        let mut cx = Context::from_waker(&waker);

        // Safety: the RUNNING state guarantees no other thread polls this frame.
        let poll = enter_task(self.scheduler.clone(), || {
            panic::catch_unwind(AssertUnwindSafe(|| unsafe {
                (&mut *self.future.get()).as_mut().poll(&mut cx)
            }))
        });

        match poll {
            Ok(Poll::Pending) => {
                if self
                    .state
                    .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    // Woken while running; ask for another slice. The requeue
                    // honours any scheduler rebinding done during the poll.
                    self.state.store(QUEUED, Ordering::Release);
                    self.schedule();
                }
            }
            Ok(Poll::Ready(value)) => {
                self.slot.set_value(value);
                self.finish();
            }
            Err(payload) => {
                self.slot.set_error(payload);
                self.finish();
            }
        }
    }

    fn finish(&self) {
        self.state.store(COMPLETED, Ordering::Release);
        self.notify();
    }

    /// Signals the task to be resumed.
    ///
    /// If the task is `IDLE` it moves to `QUEUED` and is scheduled. If it
    /// is `RUNNING` it moves to `NOTIFIED` so another slice follows the
    /// current one.
    pub(crate) fn wake_task(self: Arc<Self>) {
        loop {
            let state = self.state.load(Ordering::Acquire);

            match state {
                IDLE => {
                    if self
                        .state
                        .compare_exchange(IDLE, QUEUED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        self.schedule();
                        return;
                    }
                }
                RUNNING => {
                    if self
                        .state
                        .compare_exchange(RUNNING, NOTIFIED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }
                }
                // Already queued, notified, finished, or never started.
                _ => return,
            }
        }
    }

    /// Polls the frame directly with the caller's context.
    ///
    /// Only the move-only, never-started handle may call this: exclusive
    /// frame access follows from that handle being the frame's sole driver.
    pub(crate) fn poll_inline(&self, cx: &mut Context<'_>) -> Poll<T> {
        // Safety: see above; started tasks are driven through `run` instead.
        let poll = unsafe { (&mut *self.future.get()).as_mut().poll(cx) };

        if poll.is_ready() {
            self.state.store(COMPLETED, Ordering::Release);
        }

        poll
    }

    /// Records abandonment of a run slice that was discarded without ever
    /// executing (its executor shut down). The continuation observes
    /// a broken promise instead of hanging forever.
    fn abandon(self: Arc<Self>) {
        if self.state.load(Ordering::Acquire) == COMPLETED {
            return;
        }

        self.slot.set_broken();
        self.state.store(COMPLETED, Ordering::Release);
        self.notify();
    }
}

impl<T: Send + 'static> Wake for RawTask<T> {
    fn wake(self: Arc<Self>) {
        self.wake_task();
    }
}

impl<T> Drop for RawTask<T> {
    /// A frame released before producing its outcome marks the slot broken
    /// and fires any completion signal, so coordinators never stall on a
    /// vanished operand.
    fn drop(&mut self) {
        if self.state.load(Ordering::Acquire) != COMPLETED {
            self.slot.set_broken();
            self.notify();
        }
    }
}

/// A posted run slice.
///
/// If the executor discards the job without invoking it, the task is
/// abandoned rather than silently lost.
struct RunJob<T: Send + 'static> {
    task: Option<Arc<RawTask<T>>>,
}

impl<T: Send + 'static> RunJob<T> {
    fn fire(&mut self) {
        if let Some(task) = self.task.take() {
            task.run();
        }
    }
}

impl<T: Send + 'static> Drop for RunJob<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abandon();
        }
    }
}
