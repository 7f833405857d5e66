use crate::task::TaskError;

use std::any::Any;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Nothing has been written yet.
const EMPTY: usize = 0;

/// A producer has claimed the slot and is writing.
const WRITING: usize = 1;

/// The slot holds a value.
const VALUE: usize = 2;

/// The slot holds a captured failure payload.
const FAILED: usize = 3;

/// The producing frame was released without ever writing.
const BROKEN: usize = 4;

/// Single-write, single-read outcome storage.
///
/// A `ResultSlot` holds the outcome of one asynchronous computation: a
/// value, a captured failure, or nothing yet. Exactly one producer moves
/// the slot out of its empty state exactly once; the consumer reads only
/// after being notified of the transition.
///
/// Writing twice is a contract violation and panics. Reading while empty
/// yields [`TaskError::ValueNotSet`].
pub struct ResultSlot<T> {
    state: AtomicUsize,
    value: UnsafeCell<Option<T>>,
    error: UnsafeCell<Option<Box<dyn Any + Send>>>,
}

// The cells are only touched by the single producer (guarded by the
// EMPTY -> WRITING claim) and the single consumer (after observing a
// published terminal state).
unsafe impl<T: Send> Send for ResultSlot<T> {}
unsafe impl<T: Send> Sync for ResultSlot<T> {}

impl<T> ResultSlot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            state: AtomicUsize::new(EMPTY),
            value: UnsafeCell::new(None),
            error: UnsafeCell::new(None),
        }
    }

    /// Stores the computation's value.
    ///
    /// # Panics
    /// Panics if the slot was already written.
    pub fn set_value(&self, value: T) {
        self.claim();
        unsafe {
            *self.value.get() = Some(value);
        }
        self.state.store(VALUE, Ordering::Release);
    }

    /// Stores a captured failure payload.
    ///
    /// # Panics
    /// Panics if the slot was already written.
    pub fn set_error(&self, error: Box<dyn Any + Send>) {
        self.claim();
        unsafe {
            *self.error.get() = Some(error);
        }
        self.state.store(FAILED, Ordering::Release);
    }

    /// Records that the producing frame was released without writing.
    ///
    /// Unlike `set_value`/`set_error` this is not a producer API: it only
    /// marks the slot if nothing was ever written.
    pub(crate) fn set_broken(&self) {
        let _ = self
            .state
            .compare_exchange(EMPTY, BROKEN, Ordering::AcqRel, Ordering::Acquire);
    }

    fn claim(&self) {
        assert!(
            self.state
                .compare_exchange(EMPTY, WRITING, Ordering::AcqRel, Ordering::Acquire)
                .is_ok(),
            "result slot written twice"
        );
    }

    /// Returns `true` once an outcome (value, failure, or abandonment)
    /// has been published. Never blocks.
    pub fn has_value(&self) -> bool {
        matches!(self.state.load(Ordering::Acquire), VALUE | FAILED | BROKEN)
    }

    /// Drains the outcome.
    ///
    /// Yields the stored value, or the captured failure as
    /// [`TaskError::Panicked`], or [`TaskError::BrokenPromise`] if the
    /// producer was released without writing. While the slot is empty
    /// this fails with [`TaskError::ValueNotSet`].
    pub fn take(&self) -> Result<T, TaskError> {
        match self.state.load(Ordering::Acquire) {
            VALUE => {
                let value = unsafe { (*self.value.get()).take() };
                Ok(value.expect("result already taken"))
            }
            FAILED => {
                let error = unsafe { (*self.error.get()).take() };
                Err(TaskError::Panicked(error.expect("error already taken")))
            }
            BROKEN => Err(TaskError::BrokenPromise),
            _ => Err(TaskError::ValueNotSet),
        }
    }
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
