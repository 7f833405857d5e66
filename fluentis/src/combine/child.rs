use crate::task::TaskError;
use crate::task::core::{Continuation, RawTask};

use std::future::Future;
use std::sync::Arc;

/// Adapter driving one combinator operand as an independently owned task.
///
/// Whatever the operand's original type, the adapter runs it to
/// completion, stores its outcome (value, captured panic, or abandonment)
/// in a private result slot, and then invokes the coordinator signal
/// supplied by the combinator that created it — instead of resuming a
/// single fixed continuation. This is what lets the aggregates treat
/// heterogeneous operands uniformly.
pub(crate) struct ContinuationTask<T> {
    raw: Arc<RawTask<T>>,
}

impl<T: Send + 'static> ContinuationTask<T> {
    pub(crate) fn new<F>(operand: F, signal: Box<dyn Fn() + Send + Sync>) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let raw = RawTask::new(operand);
        raw.set_continuation(Continuation::Signal(signal));

        Self { raw }
    }

    /// Runs the operand's first slice on the calling thread.
    ///
    /// Later slices run wherever the operand's wake-ups land, so
    /// completions from different operands can genuinely race across
    /// threads.
    pub(crate) fn start(&self) {
        self.raw.clone().start();
    }

    /// Drains the adapter's slot. Valid once the coordinator has been
    /// signalled for this operand.
    pub(crate) fn take(&self) -> Result<T, TaskError> {
        self.raw.slot.take()
    }
}
