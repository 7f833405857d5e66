use fluentis::{Task, TaskPool, ThreadPoolBuilder, delay};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);

    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_completed_entries_are_cleaned_up() {
    let executor = Arc::new(ThreadPoolBuilder::new().worker_threads(2).build());
    let pool = TaskPool::new(executor.clone());

    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..20 {
        let counter = counter.clone();
        pool.push(Task::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    }

    wait_until("the pool to drain", || pool.is_empty());
    assert_eq!(counter.load(Ordering::SeqCst), 20);
}

#[test]
fn test_cleanup_leaves_running_tasks_alone() {
    let executor = Arc::new(ThreadPoolBuilder::new().worker_threads(2).build());
    let pool = TaskPool::new(executor.clone());

    pool.push(Task::new(async {
        delay(Duration::from_millis(60)).await;
    }));

    assert_eq!(pool.len(), 1);

    pool.cleanup();
    thread::sleep(Duration::from_millis(10));
    assert_eq!(pool.len(), 1, "an unfinished task must keep its entry");

    wait_until("the delayed task to be cleaned up", || pool.is_empty());
}

#[test]
fn test_concurrent_spawn_and_complete() {
    let executor = Arc::new(ThreadPoolBuilder::new().worker_threads(4).build());
    let pool = TaskPool::new(executor.clone());
    let counter = Arc::new(AtomicUsize::new(0));

    let mut pushers = Vec::new();
    for _ in 0..4 {
        let pool = pool.clone();
        let counter = counter.clone();

        pushers.push(thread::spawn(move || {
            for _ in 0..25 {
                let counter = counter.clone();
                pool.push(Task::new(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }));
            }
        }));
    }

    for pusher in pushers {
        pusher.join().unwrap();
    }

    wait_until("the pool to drain", || pool.is_empty());
    assert_eq!(counter.load(Ordering::SeqCst), 100);
}
