use fluentis::combine::Any2;
use fluentis::{CancelToken, Cancellable, Delay, delay, race, race_vec, sync_wait};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::thread;
use std::time::{Duration, Instant};

/// Operand resolving to a value after a delay; cancellation is observed
/// through the delay's own token, so a cancelled operand resolves early.
struct TimedValue<T> {
    delay: Delay,
    value: Option<T>,
}

impl<T> TimedValue<T> {
    fn new(after: Duration, value: T) -> Self {
        Self {
            delay: delay(after),
            value: Some(value),
        }
    }
}

impl<T: Unpin> Future for TimedValue<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let this = self.get_mut();

        match Pin::new(&mut this.delay).poll(cx) {
            Poll::Ready(()) => Poll::Ready(this.value.take().expect("value already taken")),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> Cancellable for TimedValue<T> {
    fn cancel_token(&self) -> CancelToken {
        self.delay.cancel_token()
    }
}

/// Operand that hands out a token but deliberately never looks at it.
struct Stubborn {
    delay: Delay,
    token: CancelToken,
    finished: Arc<AtomicBool>,
}

impl Future for Stubborn {
    type Output = u32;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<u32> {
        let this = self.get_mut();

        match Pin::new(&mut this.delay).poll(cx) {
            Poll::Ready(()) => {
                this.finished.store(true, Ordering::SeqCst);
                Poll::Ready(0)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Cancellable for Stubborn {
    fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }
}

#[test]
fn test_race_returns_fastest_and_cancels_every_operand() {
    let fast = TimedValue::new(Duration::from_millis(10), 1u32);
    let slow = TimedValue::new(Duration::from_millis(50), 2u32);

    let fast_token = fast.cancel_token();
    let slow_token = slow.cancel_token();

    let winner = sync_wait(race((fast, slow))).unwrap();

    assert!(matches!(winner, Any2::First(Ok(1))));

    // Both operands observe the request, the already-completed winner
    // included, where it is a no-op.
    assert!(fast_token.is_cancelled());
    assert!(slow_token.is_cancelled());
}

#[test]
fn test_race_vec_tags_the_winner() {
    let operands = vec![
        TimedValue::new(Duration::from_millis(40), 0usize),
        TimedValue::new(Duration::from_millis(10), 1usize),
        TimedValue::new(Duration::from_millis(80), 2usize),
    ];
    let tokens: Vec<_> = operands.iter().map(|op| op.cancel_token()).collect();

    let (index, outcome) = sync_wait(race_vec(operands)).unwrap();

    assert_eq!(index, 1);
    assert_eq!(outcome.unwrap(), 1);
    assert!(tokens.iter().all(|token| token.is_cancelled()));
}

#[test]
fn test_cancellation_is_advisory_only() {
    let finished = Arc::new(AtomicBool::new(false));

    let stubborn = Stubborn {
        delay: delay(Duration::from_millis(30)),
        token: CancelToken::new(),
        finished: finished.clone(),
    };
    let token = stubborn.cancel_token();

    let quick = TimedValue::new(Duration::from_millis(5), 1u32);

    let winner = sync_wait(race((quick, stubborn))).unwrap();

    assert_eq!(winner.index(), 0);
    assert!(token.is_cancelled(), "the stop request must be delivered");

    thread::sleep(Duration::from_millis(200));
    assert!(
        finished.load(Ordering::SeqCst),
        "an operand ignoring its token runs to completion"
    );
}

#[test]
fn test_winner_returns_without_waiting_for_cancelled_losers() {
    let fast = TimedValue::new(Duration::from_millis(5), 1u32);
    let slow = TimedValue::new(Duration::from_secs(30), 2u32);

    let slow_token = slow.cancel_token();

    let start = Instant::now();
    let winner = sync_wait(race((fast, slow))).unwrap();

    assert_eq!(winner.index(), 0);
    assert!(slow_token.is_cancelled());
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "the broadcast is fire-and-forget; losers are not awaited"
    );
}
