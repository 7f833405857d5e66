use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Arc, Condvar, Mutex, OnceLock};
use std::task::Waker;
use std::thread;
use std::time::Instant;

/// An entry in the timer queue.
///
/// `TimerEntry` represents a scheduled wake-up at a specific deadline,
/// stored inside a binary heap ordered by deadline.
pub(crate) struct TimerEntry {
    /// The time at which the timer should fire.
    pub(crate) deadline: Instant,

    /// Waker to notify when the deadline is reached.
    pub(crate) waker: Waker,
}

impl Eq for TimerEntry {}

impl PartialEq for TimerEntry {
    /// Two timer entries are equal if their deadlines are equal.
    fn eq(&self, other: &Self) -> bool {
        self.deadline.eq(&other.deadline)
    }
}

impl Ord for TimerEntry {
    /// Orders timer entries by deadline.
    ///
    /// Note that the comparison is **reversed** so that a
    /// `BinaryHeap<TimerEntry>` behaves as a min-heap, where the earliest
    /// deadline is popped first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.deadline.cmp(&self.deadline)
    }
}

impl PartialOrd for TimerEntry {
    /// Partial ordering consistent with [`Ord`].
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deadline-ordered wake-up queue drained by a dedicated thread.
pub(crate) struct TimerQueue {
    heap: Mutex<BinaryHeap<TimerEntry>>,
    condvar: Condvar,
}

impl TimerQueue {
    pub(crate) fn register(&self, entry: TimerEntry) {
        self.heap.lock().unwrap().push(entry);
        self.condvar.notify_all();
    }

    /// Timer thread loop: fire everything due, then sleep until the next
    /// deadline or the next registration.
    fn run(&self) {
        loop {
            let mut due = Vec::new();
            {
                let mut heap = self.heap.lock().unwrap();
                let now = Instant::now();

                while heap.peek().is_some_and(|entry| entry.deadline <= now) {
                    due.push(heap.pop().expect("peeked entry missing"));
                }
            }

            // Woken outside the lock: a wake may re-register immediately.
            // Every due entry is woken, cancelled delays included; the
            // delay itself decides what its next poll resolves to.
            for entry in due {
                entry.waker.wake();
            }

            let heap = self.heap.lock().unwrap();
            let now = Instant::now();

            match heap.peek().map(|entry| entry.deadline) {
                Some(deadline) if deadline <= now => drop(heap),
                Some(deadline) => {
                    let _ = self.condvar.wait_timeout(heap, deadline - now).unwrap();
                }
                None => {
                    let _guard = self.condvar.wait(heap).unwrap();
                }
            }
        }
    }
}

/// Global timer queue, with its thread started on first use.
pub(crate) fn timer() -> Arc<TimerQueue> {
    static TIMER: OnceLock<Arc<TimerQueue>> = OnceLock::new();

    TIMER
        .get_or_init(|| {
            let queue = Arc::new(TimerQueue {
                heap: Mutex::new(BinaryHeap::new()),
                condvar: Condvar::new(),
            });

            let runner = queue.clone();
            thread::spawn(move || runner.run());

            queue
        })
        .clone()
}
