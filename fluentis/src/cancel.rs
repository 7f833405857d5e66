//! Advisory cancellation.
//!
//! Cancellation in this runtime is cooperative: a [`CancelToken`] records
//! a stop *request*, and it is entirely up to the operation holding the
//! token whether and when to observe it. An operation that ignores its
//! token runs to completion regardless of how often `cancel` is called.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// An operation that can hand out a cancellation token.
///
/// Required of every operand passed to [`race`](crate::combine::race):
/// the combinator collects one token per operand up front and broadcasts
/// the stop request once a winner is known.
pub trait Cancellable {
    /// Returns a token that can later request cancellation of this
    /// operation. May be called any number of times; all tokens share the
    /// same underlying flag.
    fn cancel_token(&self) -> CancelToken;
}

/// A shared, cloneable cancellation flag.
#[derive(Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, unset token.
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests cancellation.
    ///
    /// Idempotent and non-blocking; calling it after the operation has
    /// already completed is a harmless no-op.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
