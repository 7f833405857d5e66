//! Asynchronous task primitives.
//!
//! This module defines the core abstractions used by the runtime to
//! represent lazily started tasks and their outcomes.
//!
//! It includes:
//! - single-write, single-read result slots,
//! - lifecycle state management,
//! - the move-only [`Task`] handle and its [`JoinHandle`],
//! - the shared task core used internally by combinators, the task pool,
//!   and the blocking bridge.
//!
//! Most users will interact with this module through [`Task::new`],
//! awaiting the handle, or [`Task::start_on`].

pub(crate) mod core;
pub(crate) mod state;

mod handle;
mod slot;

pub use handle::{JoinHandle, Task};
pub use slot::ResultSlot;

use std::any::Any;
use std::fmt;

/// Failure reported when observing a task outcome.
pub enum TaskError {
    /// The result slot was read before any outcome was produced.
    ValueNotSet,

    /// The producing frame was released without ever writing its slot.
    BrokenPromise,

    /// The task body panicked; the payload is kept for the observer.
    Panicked(Box<dyn Any + Send>),
}

impl fmt::Debug for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::ValueNotSet => f.write_str("ValueNotSet"),
            TaskError::BrokenPromise => f.write_str("BrokenPromise"),
            TaskError::Panicked(_) => f.write_str("Panicked(..)"),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::ValueNotSet => f.write_str("no result has been set"),
            TaskError::BrokenPromise => f.write_str("task released before producing a result"),
            TaskError::Panicked(_) => f.write_str("task panicked"),
        }
    }
}

impl std::error::Error for TaskError {}
