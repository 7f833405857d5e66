use crate::cancel::{Cancellable, CancelToken};
use crate::time::timer::{TimerEntry, timer};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

/// Returns a future that resolves once `duration` has elapsed.
///
/// The delay is a cancellable operation: once cancellation has been
/// requested through its token, the future resolves at its next poll
/// instead of waiting out its deadline. The wake at the deadline still
/// fires either way, so a cancelled delay never outlives it.
pub fn delay(duration: Duration) -> Delay {
    Delay::new(duration)
}

/// Future returned by [`delay`].
pub struct Delay {
    deadline: Instant,
    registered: bool,
    cancelled: CancelToken,
}

impl Delay {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            deadline: Instant::now() + duration,
            registered: false,
            cancelled: CancelToken::new(),
        }
    }
}

impl Future for Delay {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.cancelled.is_cancelled() || Instant::now() >= this.deadline {
            return Poll::Ready(());
        }

        if !this.registered {
            this.registered = true;

            timer().register(TimerEntry {
                deadline: this.deadline,
                waker: cx.waker().clone(),
            });
        }

        Poll::Pending
    }
}

impl Cancellable for Delay {
    fn cancel_token(&self) -> CancelToken {
        self.cancelled.clone()
    }
}
