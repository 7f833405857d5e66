use fluentis::{Executor, InlineExecutor, Task, TaskError, ThreadPoolBuilder, sync_wait};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_dropped_task_never_runs_its_body() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = ran.clone();

    let task = Task::new(async move {
        flag.store(true, Ordering::SeqCst);
    });
    drop(task);

    thread::sleep(Duration::from_millis(20));
    assert!(!ran.load(Ordering::SeqCst), "lazy task must not run unless driven");
}

#[test]
fn test_awaiting_drives_the_task_inline() {
    let out = sync_wait(async {
        let task = Task::new(async { 21 * 2 });
        task.await
    });

    assert_eq!(out.unwrap(), 42);
}

#[test]
fn test_started_task_completes_through_join_handle() {
    let pool = Arc::new(ThreadPoolBuilder::new().worker_threads(2).build());

    let handle = Task::new(async { 5 }).start_on(pool.clone());
    let out = sync_wait(handle).unwrap();

    assert_eq!(out.unwrap(), 5);
}

#[test]
fn test_join_handle_reports_completion() {
    let pool = Arc::new(ThreadPoolBuilder::new().worker_threads(1).build());

    let handle = Task::new(async {}).start_on(pool.clone());

    let deadline = Instant::now() + Duration::from_secs(5);
    while !handle.is_finished() {
        assert!(Instant::now() < deadline, "task never completed");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_panic_in_task_body_is_captured() {
    let pool = Arc::new(ThreadPoolBuilder::new().worker_threads(1).build());

    let handle = Task::new(async {
        panic!("exploded");
    })
    .start_on(pool.clone());

    let out = sync_wait(handle).unwrap();
    match out {
        Err(TaskError::Panicked(payload)) => {
            assert_eq!(*payload.downcast::<&str>().unwrap(), "exploded");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_inline_executor_runs_the_task_during_start() {
    let handle = Task::new(async { 3 }).start_on(Arc::new(InlineExecutor::new()));

    assert!(handle.is_finished());
    assert_eq!(sync_wait(handle).unwrap().unwrap(), 3);
}

#[test]
fn test_shutdown_abandons_queued_task() {
    let pool = Arc::new(ThreadPoolBuilder::new().worker_threads(1).build());

    // Occupy the single worker so the task below stays queued.
    pool.post(Box::new(|| thread::sleep(Duration::from_millis(50))));
    thread::sleep(Duration::from_millis(10));

    let handle = Task::new(async { 1 }).start_on(pool.clone());
    pool.shutdown();

    let out = sync_wait(handle).unwrap();
    assert!(
        matches!(out, Err(TaskError::BrokenPromise)),
        "a discarded run must not leave the observer hanging"
    );
}
