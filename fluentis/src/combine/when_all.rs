use crate::combine::AllState;
use crate::combine::child::ContinuationTask;
use crate::task::TaskError;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A fixed-arity, possibly heterogeneous set of `when_all` operands.
///
/// Implemented for tuples of futures up to five elements (including the
/// empty tuple, which completes immediately).
pub trait WhenAllSet {
    type Output;
    type Future: Future<Output = Self::Output>;

    fn into_future(self) -> Self::Future;
}

/// Aggregates every operand in `operands` into one awaitable.
///
/// All operands are started when the aggregate is first polled, in
/// operand order; the aggregate completes only once every operand has
/// completed. The result is a tuple positionally matching the input,
/// regardless of completion order. A failing operand still occupies its
/// position as an `Err` and never prevents its siblings from running to
/// completion.
pub fn when_all<S: WhenAllSet>(operands: S) -> S::Future {
    operands.into_future()
}

/// Aggregate future produced by [`when_all`] over no operands.
pub struct WhenAll0;

impl Future for WhenAll0 {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        Poll::Ready(())
    }
}

impl WhenAllSet for () {
    type Output = ();
    type Future = WhenAll0;

    fn into_future(self) -> WhenAll0 {
        WhenAll0
    }
}

macro_rules! when_all_tuple {
    ($name:ident, $len:expr; $(($t:ident, $f:ident, $var:ident, $idx:tt)),+) => {
        /// Aggregate future produced by [`when_all`] over a tuple of
        /// operands.
        pub struct $name<$($t),+> {
            children: Option<($(ContinuationTask<$t>,)+)>,
            state: Arc<AllState>,
            started: bool,
        }

        impl<$($t: Send + 'static),+> Future for $name<$($t),+> {
            type Output = ($(Result<$t, TaskError>,)+);

            fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
                let this = self.get_mut();

                // Registered before the completion check to avoid a missed
                // wake-up from a concurrently arriving operand.
                this.state.register(cx.waker());

                if !this.started {
                    this.started = true;

                    let children = this.children.as_ref().expect("polled after completion");
                    $( children.$idx.start(); )+
                }

                if this.state.is_done() {
                    let children = this.children.take().expect("polled after completion");
                    Poll::Ready(($(children.$idx.take(),)+))
                } else {
                    Poll::Pending
                }
            }
        }

        impl<$($f),+> WhenAllSet for ($($f,)+)
        where
            $(
                $f: Future + Send + 'static,
                $f::Output: Send + 'static,
            )+
        {
            type Output = ($(Result<$f::Output, TaskError>,)+);
            type Future = $name<$($f::Output),+>;

            fn into_future(self) -> Self::Future {
                let ($($var,)+) = self;
                let state = AllState::new($len);

                let children = ($(
                    ContinuationTask::new($var, {
                        let state = state.clone();
                        Box::new(move || state.arrive())
                    }),
                )+);

                $name {
                    children: Some(children),
                    state,
                    started: false,
                }
            }
        }
    };
}

when_all_tuple!(WhenAll1, 1; (T1, F1, f1, 0));
when_all_tuple!(WhenAll2, 2; (T1, F1, f1, 0), (T2, F2, f2, 1));
when_all_tuple!(WhenAll3, 3; (T1, F1, f1, 0), (T2, F2, f2, 1), (T3, F3, f3, 2));
when_all_tuple!(WhenAll4, 4; (T1, F1, f1, 0), (T2, F2, f2, 1), (T3, F3, f3, 2), (T4, F4, f4, 3));
when_all_tuple!(WhenAll5, 5; (T1, F1, f1, 0), (T2, F2, f2, 1), (T3, F3, f3, 2), (T4, F4, f4, 3), (T5, F5, f5, 4));

/// Aggregate future over a homogeneous, dynamically sized operand list.
pub struct WhenAllVec<T> {
    children: Option<Vec<ContinuationTask<T>>>,
    state: Arc<AllState>,
    started: bool,
}

/// [`when_all`] over a `Vec` of same-typed operands.
///
/// An empty list completes immediately with an empty result.
pub fn when_all_vec<F>(operands: Vec<F>) -> WhenAllVec<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let state = AllState::new(operands.len());

    let children: Vec<ContinuationTask<F::Output>> = operands
        .into_iter()
        .map(|operand| {
            ContinuationTask::new(operand, {
                let state = state.clone();
                Box::new(move || state.arrive())
            })
        })
        .collect();

    WhenAllVec {
        children: Some(children),
        state,
        started: false,
    }
}

impl<T: Send + 'static> Future for WhenAllVec<T> {
    type Output = Vec<Result<T, TaskError>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        this.state.register(cx.waker());

        if !this.started {
            this.started = true;

            for child in this.children.as_ref().expect("polled after completion") {
                child.start();
            }
        }

        if this.state.is_done() {
            let children = this.children.take().expect("polled after completion");
            Poll::Ready(children.into_iter().map(|child| child.take()).collect())
        } else {
            Poll::Pending
        }
    }
}
