//! Combinators composing multiple awaitables into one.
//!
//! Three aggregates are provided:
//! - [`when_all`] completes once every operand has completed; the result
//!   preserves operand order regardless of completion order.
//! - [`when_any`] completes as soon as the first operand does; the result
//!   tags which operand won.
//! - [`race`] is `when_any` plus a cancellation broadcast to every operand
//!   once a winner is known.
//!
//! Each takes a tuple of heterogeneous operands (up to five); the `_vec`
//! variants take a homogeneous `Vec` of any length. Every operand is
//! driven to completion as a small independently owned task, so a failing
//! operand never prevents its siblings from finishing: failures surface
//! per slot in the aggregate result.

mod child;
mod race;
mod when_all;
mod when_any;

pub use race::{CancellableSet, Race, race, race_vec};
pub use when_all::{
    WhenAll0, WhenAll1, WhenAll2, WhenAll3, WhenAll4, WhenAll5, WhenAllSet, WhenAllVec, when_all,
    when_all_vec,
};
pub use when_any::{
    Any1, Any2, Any3, Any4, Any5, WhenAny1, WhenAny2, WhenAny3, WhenAny4, WhenAny5, WhenAnySet,
    WhenAnyVec, when_any, when_any_vec,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::Waker;

/// Countdown coordinator shared between a `when_all` aggregate and its
/// operands.
///
/// Each operand decrements the counter exactly once on completion; the
/// arrival that brings it to zero resumes the aggregate. Operands may
/// complete concurrently on different threads, so the counter is the only
/// aggregate state they touch.
pub(crate) struct AllState {
    remaining: AtomicUsize,
    waker: Mutex<Option<Waker>>,
}

impl AllState {
    pub(crate) fn new(count: usize) -> Arc<Self> {
        Arc::new(Self {
            remaining: AtomicUsize::new(count),
            waker: Mutex::new(None),
        })
    }

    pub(crate) fn register(&self, waker: &Waker) {
        *self.waker.lock().unwrap() = Some(waker.clone());
    }

    pub(crate) fn is_done(&self) -> bool {
        self.remaining.load(Ordering::Acquire) == 0
    }

    /// Records one operand completion; the last arrival resumes the
    /// aggregate.
    pub(crate) fn arrive(&self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            if let Some(waker) = self.waker.lock().unwrap().take() {
                waker.wake();
            }
        }
    }
}

pub(crate) const NO_WINNER: usize = usize::MAX;

/// Winner-claim coordinator shared between a `when_any` aggregate and its
/// operands.
///
/// The first operand to complete claims the winner flag with a single
/// compare-and-set; exactly one claim can succeed even when operands
/// complete simultaneously on different threads. Later arrivals observe
/// the flag already set and do nothing, so the aggregate is resumed
/// exactly once.
pub(crate) struct AnyState {
    winner: AtomicUsize,
    waker: Mutex<Option<Waker>>,
}

impl AnyState {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            winner: AtomicUsize::new(NO_WINNER),
            waker: Mutex::new(None),
        })
    }

    pub(crate) fn register(&self, waker: &Waker) {
        *self.waker.lock().unwrap() = Some(waker.clone());
    }

    pub(crate) fn winner(&self) -> Option<usize> {
        match self.winner.load(Ordering::Acquire) {
            NO_WINNER => None,
            index => Some(index),
        }
    }

    /// Attempts the single winner claim for the operand at `index`.
    pub(crate) fn arrive(&self, index: usize) {
        if self
            .winner
            .compare_exchange(NO_WINNER, index, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            if let Some(waker) = self.waker.lock().unwrap().take() {
                waker.wake();
            }
        }
    }
}
