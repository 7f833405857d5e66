use fluentis::{Delay, TaskError, delay, sync_wait, when_all, when_all_vec};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn test_result_order_matches_operand_order() {
    // Deliberately reversed completion order.
    let out = sync_wait(when_all((
        async {
            delay(Duration::from_millis(30)).await;
            1
        },
        async {
            delay(Duration::from_millis(20)).await;
            "x"
        },
        async {
            delay(Duration::from_millis(10)).await;
            3.0
        },
    )))
    .unwrap();

    assert_eq!(out.0.unwrap(), 1);
    assert_eq!(out.1.unwrap(), "x");
    assert_eq!(out.2.unwrap(), 3.0);
}

#[test]
fn test_empty_when_all_completes_immediately() {
    sync_wait(when_all(())).unwrap();
}

#[test]
fn test_failure_occupies_its_slot_without_short_circuit() {
    let ran = Arc::new(AtomicUsize::new(0));

    let first_marker = ran.clone();
    let second_marker = ran.clone();

    let (a, b) = sync_wait(when_all((
        async move {
            first_marker.fetch_add(1, Ordering::SeqCst);
            panic!("first failed");
        },
        async move {
            delay(Duration::from_millis(10)).await;
            second_marker.fetch_add(1, Ordering::SeqCst);
            5
        },
    )))
    .unwrap();

    assert!(matches!(a, Err(TaskError::Panicked(_))));
    assert_eq!(b.unwrap(), 5);
    assert_eq!(ran.load(Ordering::SeqCst), 2, "every operand must run to completion");
}

#[test]
fn test_vec_results_are_positional() {
    let mut operands = Vec::new();
    for i in 0..5u64 {
        operands.push(async move {
            delay(Duration::from_millis(50 - 10 * i)).await;
            i
        });
    }

    let results = sync_wait(when_all_vec(operands)).unwrap();

    assert_eq!(results.len(), 5);
    for (i, result) in results.into_iter().enumerate() {
        assert_eq!(result.unwrap(), i as u64);
    }
}

#[test]
fn test_empty_vec_completes_immediately() {
    let results = sync_wait(when_all_vec(Vec::<Delay>::new())).unwrap();
    assert!(results.is_empty());
}

#[fluentis::test]
async fn test_when_all_awaited_inside_a_task() {
    let (a, b) = when_all((async { 2 }, async { 3 })).await;
    assert_eq!(a.unwrap() + b.unwrap(), 5);
}
