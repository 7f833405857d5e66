//! Timer primitives.
//!
//! A single lazily started timer thread drives all [`delay`] futures.
//! Timeouts are not a separate primitive here: race an operation against
//! a `delay` to bound its duration.

mod delay;
mod timer;

pub use delay::{Delay, delay};
