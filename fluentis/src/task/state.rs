/// Task frame exists but has never been driven.
///
/// Nothing runs until the task is started or awaited.
pub(crate) const CREATED: usize = 0;

/// Task is queued for execution.
///
/// A run has been scheduled and is waiting to be picked up.
pub(crate) const QUEUED: usize = 1;

/// Task is currently being executed.
///
/// At most one thread may observe this state at a time.
pub(crate) const RUNNING: usize = 2;

/// Task is suspended and not scheduled.
///
/// A wake-up moves it back to `QUEUED`.
pub(crate) const IDLE: usize = 3;

/// Task has been woken while running.
///
/// This state indicates that the task was woken while already
/// executing and should be re-queued once the current slice finishes.
pub(crate) const NOTIFIED: usize = 4;

/// Task has produced its outcome.
///
/// The frame has written its result slot and will not be polled again.
pub(crate) const COMPLETED: usize = 5;
