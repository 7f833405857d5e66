use crate::combine::AnyState;
use crate::combine::child::ContinuationTask;
use crate::task::TaskError;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A fixed-arity, possibly heterogeneous set of `when_any` operands.
///
/// Implemented for tuples of futures with one to five elements.
pub trait WhenAnySet {
    type Output;
    type Future: Future<Output = Self::Output>;

    fn into_future(self) -> Self::Future;
}

/// Aggregates the operands into an awaitable that completes as soon as
/// the first one does.
///
/// All operands are started when the aggregate is first polled. The first
/// to complete claims the winner flag atomically — exactly one claim can
/// succeed system-wide, even when operands complete simultaneously on
/// different worker threads. The result is a sum type tagging which
/// operand won, carrying its outcome (a failing operand can legitimately
/// win). Losing operands keep running to completion in the background;
/// `when_any` itself never cancels them — that is [`race`]'s job.
///
/// [`race`]: crate::combine::race
pub fn when_any<S: WhenAnySet>(operands: S) -> S::Future {
    operands.into_future()
}

macro_rules! when_any_tuple {
    ($name:ident, $enum_name:ident; $(($variant:ident, $t:ident, $f:ident, $var:ident, $idx:tt)),+) => {
        /// Tagged outcome of [`when_any`]: which operand won, and what it
        /// produced.
        pub enum $enum_name<$($t),+> {
            $( $variant(Result<$t, TaskError>), )+
        }

        impl<$($t),+> $enum_name<$($t),+> {
            /// Index of the operand that produced this outcome.
            pub fn index(&self) -> usize {
                match self {
                    $( Self::$variant(_) => $idx, )+
                }
            }
        }

        /// Aggregate future produced by [`when_any`] over a tuple of
        /// operands.
        pub struct $name<$($t),+> {
            children: Option<($(ContinuationTask<$t>,)+)>,
            state: Arc<AnyState>,
            started: bool,
        }

        impl<$($t: Send + 'static),+> Future for $name<$($t),+> {
            type Output = $enum_name<$($t),+>;

            fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
                let this = self.get_mut();

                this.state.register(cx.waker());

                if !this.started {
                    this.started = true;

                    let children = this.children.as_ref().expect("polled after completion");
                    $( children.$idx.start(); )+
                }

                match this.state.winner() {
                    Some(winner) => {
                        let children = this.children.take().expect("polled after completion");

                        let outcome = match winner {
                            $( $idx => $enum_name::$variant(children.$idx.take()), )+
                            _ => unreachable!("winner index out of range"),
                        };

                        Poll::Ready(outcome)
                    }
                    None => Poll::Pending,
                }
            }
        }

        impl<$($f),+> WhenAnySet for ($($f,)+)
        where
            $(
                $f: Future + Send + 'static,
                $f::Output: Send + 'static,
            )+
        {
            type Output = $enum_name<$($f::Output),+>;
            type Future = $name<$($f::Output),+>;

            fn into_future(self) -> Self::Future {
                let ($($var,)+) = self;
                let state = AnyState::new();

                let children = ($(
                    ContinuationTask::new($var, {
                        let state = state.clone();
                        Box::new(move || state.arrive($idx))
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

when_any_tuple!(WhenAny1, Any1; (First, T1, F1, f1, 0));
when_any_tuple!(WhenAny2, Any2; (First, T1, F1, f1, 0), (Second, T2, F2, f2, 1));
when_any_tuple!(WhenAny3, Any3; (First, T1, F1, f1, 0), (Second, T2, F2, f2, 1), (Third, T3, F3, f3, 2));
when_any_tuple!(WhenAny4, Any4; (First, T1, F1, f1, 0), (Second, T2, F2, f2, 1), (Third, T3, F3, f3, 2), (Fourth, T4, F4, f4, 3));
when_any_tuple!(WhenAny5, Any5; (First, T1, F1, f1, 0), (Second, T2, F2, f2, 1), (Third, T3, F3, f3, 2), (Fourth, T4, F4, f4, 3), (Fifth, T5, F5, f5, 4));

/// Aggregate future over a homogeneous, dynamically sized operand list.
pub struct WhenAnyVec<T> {
    children: Option<Vec<ContinuationTask<T>>>,
    state: Arc<AnyState>,
    started: bool,
}

/// [`when_any`] over a `Vec` of same-typed operands.
///
/// Resolves to the winning operand's index and outcome.
///
/// # Panics
/// Panics if `operands` is empty.
pub fn when_any_vec<F>(operands: Vec<F>) -> WhenAnyVec<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    assert!(
        !operands.is_empty(),
        "when_any requires at least one operand"
    );

    let state = AnyState::new();

    let children: Vec<ContinuationTask<F::Output>> = operands
        .into_iter()
        .enumerate()
        .map(|(index, operand)| {
            ContinuationTask::new(operand, {
                let state = state.clone();
                Box::new(move || state.arrive(index))
            })
        })
        .collect();

    WhenAnyVec {
        children: Some(children),
        state,
        started: false,
    }
}

impl<T: Send + 'static> Future for WhenAnyVec<T> {
    type Output = (usize, Result<T, TaskError>);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        this.state.register(cx.waker());

        if !this.started {
            this.started = true;

            for child in this.children.as_ref().expect("polled after completion") {
                child.start();
            }
        }

        match this.state.winner() {
            Some(winner) => {
                let children = this.children.take().expect("polled after completion");
                Poll::Ready((winner, children[winner].take()))
            }
            None => Poll::Pending,
        }
    }
}
