use crate::executor::{Executor, Work};

/// Executor that runs posted work immediately on the posting thread.
///
/// Useful for tests and for short work where a thread hop would cost more
/// than it buys. Posted work runs to completion before `post` returns, so
/// long-running work will stall the posting thread.
pub struct InlineExecutor;

impl InlineExecutor {
    /// Creates a new inline executor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for InlineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for InlineExecutor {
    fn post(&self, work: Work) {
        work();
    }
}
