use fluentis::combine::Any2;
use fluentis::{
    Executor, TaskError, ThreadPoolBuilder, delay, schedule_on, sync_wait, when_any, when_any_vec,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

#[test]
fn test_first_completion_wins() {
    let winner = sync_wait(when_any((
        async {
            delay(Duration::from_millis(10)).await;
            "fast"
        },
        async {
            delay(Duration::from_millis(60)).await;
            "slow"
        },
    )))
    .unwrap();

    assert_eq!(winner.index(), 0);
    assert!(matches!(winner, Any2::First(Ok("fast"))));
}

#[test]
fn test_failing_operand_can_win() {
    let winner = sync_wait(when_any((
        async {
            panic!("immediate failure");
        },
        async {
            delay(Duration::from_millis(50)).await;
            2
        },
    )))
    .unwrap();

    match winner {
        Any2::First(Err(TaskError::Panicked(payload))) => {
            assert_eq!(*payload.downcast::<&str>().unwrap(), "immediate failure");
        }
        other => panic!(
            "expected the failing operand to win, got operand {}",
            other.index()
        ),
    }
}

#[test]
fn test_losers_keep_running_in_the_background() {
    let finished = Arc::new(AtomicBool::new(false));
    let flag = finished.clone();

    let winner = sync_wait(when_any((
        async { 1 },
        async move {
            delay(Duration::from_millis(30)).await;
            flag.store(true, Ordering::SeqCst);
            2
        },
    )))
    .unwrap();

    assert_eq!(winner.index(), 0);

    thread::sleep(Duration::from_millis(150));
    assert!(
        finished.load(Ordering::SeqCst),
        "when_any must not cancel losing operands"
    );
}

#[test]
fn test_exactly_one_winner_under_concurrent_completion() {
    let pool = Arc::new(ThreadPoolBuilder::new().worker_threads(4).build());

    for _ in 0..50 {
        let mut operands = Vec::new();
        for i in 0..8usize {
            let target: Arc<dyn Executor> = pool.clone();
            operands.push(async move {
                schedule_on(target).await;
                i
            });
        }

        let (index, outcome) = sync_wait(when_any_vec(operands)).unwrap();

        assert!(index < 8);
        assert_eq!(outcome.unwrap(), index);
    }
}

#[test]
fn test_vec_winner_is_tagged_with_its_index() {
    let operands = vec![
        async_delay_value(40, 'a'),
        async_delay_value(10, 'b'),
        async_delay_value(80, 'c'),
    ];

    let (index, outcome) = sync_wait(when_any_vec(operands)).unwrap();

    assert_eq!(index, 1);
    assert_eq!(outcome.unwrap(), 'b');
}

fn async_delay_value(
    millis: u64,
    value: char,
) -> impl std::future::Future<Output = char> + Send + 'static {
    async move {
        delay(Duration::from_millis(millis)).await;
        value
    }
}
