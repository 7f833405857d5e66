//! # Fluentis
//!
//! **Fluentis** is a lightweight asynchronous task runtime: a library of
//! composable, lazily started tasks that can be awaited individually or
//! combined, scheduled onto pluggable executors, and bridged back into
//! synchronous blocking code.
//!
//! Unlike general-purpose runtimes like Tokio or async-std, Fluentis does
//! not ship an I/O reactor. It focuses on structured concurrency
//! primitives that work with any backend able to run posted work:
//!
//! - **Lazy tasks** — nothing runs until a [`Task`] is awaited or started
//! - **Pluggable executors** — a single `post(work)` capability, with an
//!   inline backend and a worker [`ThreadPool`] provided
//! - **Combinators** — [`when_all`](combine::when_all),
//!   [`when_any`](combine::when_any), and [`race`](combine::race) with
//!   advisory cancellation
//! - **A blocking bridge** — [`sync_wait`] runs any awaitable to
//!   completion from synchronous code
//! - **A fire-and-forget [`TaskPool`]** with executor-serialized cleanup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fluentis::{Task, ThreadPoolBuilder, schedule_on, sync_wait};
//! use std::sync::Arc;
//!
//! #[fluentis::main]
//! async fn main() {
//!     let pool = Arc::new(ThreadPoolBuilder::new().build());
//!
//!     // Hop onto a worker thread, then come back with a value.
//!     schedule_on(pool.clone()).await;
//!
//!     let task = Task::new(async { 6 * 7 });
//!     println!("{}", task.await);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`task`] — lazy tasks, join handles, result slots
//! - [`executor`] — the executor capability and backends
//! - [`combine`] — when_all / when_any / race
//! - [`cancel`] — advisory cancellation tokens
//! - [`pool`] — the fire-and-forget task pool
//! - [`time`] — delay futures backed by a shared timer thread

mod bridge;
mod context;
mod utils;

pub mod cancel;
pub mod combine;
pub mod executor;
pub mod pool;
pub mod task;
pub mod time;

pub use bridge::sync_wait;
pub use cancel::{Cancellable, CancelToken};
pub use combine::{race, race_vec, when_all, when_all_vec, when_any, when_any_vec};
pub use executor::{Executor, InlineExecutor, ScheduleOn, ThreadPool, ThreadPoolBuilder, schedule_on};
pub use pool::TaskPool;
pub use task::{JoinHandle, ResultSlot, Task, TaskError};
pub use time::{Delay, delay};

pub use fluentis_macros::*;
