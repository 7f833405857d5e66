use fluentis::{ThreadPoolBuilder, schedule_on, sync_wait};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_schedule_on_resumes_on_a_worker_thread() {
    let pool = Arc::new(ThreadPoolBuilder::new().worker_threads(2).build());
    let main_thread = thread::current().id();

    let observed = Arc::new(Mutex::new(None));
    let slot = observed.clone();
    let target = pool.clone();

    let out = sync_wait(async move {
        schedule_on(target).await;

        *slot.lock().unwrap() = Some(thread::current().id());
        7
    });

    assert_eq!(out.unwrap(), 7);

    let worker_thread = observed.lock().unwrap().take().unwrap();
    assert_ne!(worker_thread, main_thread);
}

#[test]
fn test_schedule_on_rebinds_for_later_resumptions() {
    let first = Arc::new(ThreadPoolBuilder::new().worker_threads(1).build());
    let second = Arc::new(ThreadPoolBuilder::new().worker_threads(1).build());

    let first_target = first.clone();
    let second_target = second.clone();

    let (a, b) = sync_wait(async move {
        schedule_on(first_target).await;
        let a = thread::current().id();

        schedule_on(second_target).await;
        let b = thread::current().id();

        (a, b)
    })
    .unwrap();

    assert_ne!(a, b, "each hop must land on the target pool's worker");
    assert_ne!(a, thread::current().id());
    assert_ne!(b, thread::current().id());
}
