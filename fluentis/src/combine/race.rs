use crate::cancel::{Cancellable, CancelToken};
use crate::combine::when_any::{WhenAnySet, WhenAnyVec, when_any_vec};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An operand set whose members can all hand out cancellation tokens.
pub trait CancellableSet {
    fn cancel_tokens(&self) -> Vec<CancelToken>;
}

macro_rules! cancellable_tuple {
    ($(($f:ident, $idx:tt)),+) => {
        impl<$($f: Cancellable),+> CancellableSet for ($($f,)+) {
            fn cancel_tokens(&self) -> Vec<CancelToken> {
                vec![$(self.$idx.cancel_token()),+]
            }
        }
    };
}

cancellable_tuple!((F1, 0));
cancellable_tuple!((F1, 0), (F2, 1));
cancellable_tuple!((F1, 0), (F2, 1), (F3, 2));
cancellable_tuple!((F1, 0), (F2, 1), (F3, 2), (F4, 3));
cancellable_tuple!((F1, 0), (F2, 1), (F3, 2), (F4, 3), (F5, 4));

/// [`when_any`](crate::combine::when_any) plus a cancellation broadcast.
///
/// Once a winner is known, `cancel()` is requested on every operand's
/// token — including the winner's, where it is a harmless no-op since the
/// operand already completed. The broadcast is fire-and-forget: the
/// aggregate resolves with the winner's outcome without waiting for the
/// cancelled losers to actually stop.
pub fn race<S>(operands: S) -> Race<S::Future>
where
    S: WhenAnySet + CancellableSet,
{
    let tokens = operands.cancel_tokens();

    Race {
        inner: operands.into_future(),
        tokens,
    }
}

/// [`race`] over a `Vec` of same-typed operands.
///
/// # Panics
/// Panics if `operands` is empty.
pub fn race_vec<F>(operands: Vec<F>) -> Race<WhenAnyVec<F::Output>>
where
    F: Future + Cancellable + Send + 'static,
    F::Output: Send + 'static,
{
    let tokens = operands
        .iter()
        .map(|operand| operand.cancel_token())
        .collect();

    Race {
        inner: when_any_vec(operands),
        tokens,
    }
}

/// Aggregate future produced by [`race`] and [`race_vec`].
pub struct Race<F> {
    inner: F,
    tokens: Vec<CancelToken>,
}

impl<F: Future + Unpin> Future for Race<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<F::Output> {
        let this = self.get_mut();

        match Pin::new(&mut this.inner).poll(cx) {
            Poll::Ready(winner) => {
                for token in &this.tokens {
                    token.cancel();
                }

                Poll::Ready(winner)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
