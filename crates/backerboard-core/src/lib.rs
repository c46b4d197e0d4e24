//! # Signals and the cooperative scheduler
//!
//! Backerboard view-models are plain objects with input methods and output
//! signals. This crate carries the two pieces they are built on:
//!
//! - `Signal<T>` — push-based output stream a view layer subscribes to.
//! - `Scheduler` — single-threaded virtual-time task queue that delivers
//!   service-call completions and timed waits deterministically.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a stream of values:
//!
//! ```rust
//! use backerboard_core::*;
//!
//! let names = Signal::new();
//! names.subscribe(|n: &String| println!("hello, {n}"));
//! names.emit("Jane".to_string());
//! assert_eq!(names.last(), Some("Jane".to_string()));
//! ```
//!
//! `emit_distinct` drops consecutive duplicates, which is how outputs that
//! represent display state (rather than refresh triggers) are wired.
//!
//! ## The scheduler
//!
//! All asynchrony in the view-model layer flows through one `Scheduler`.
//! Work is enqueued with a delay and runs when the clock passes its due
//! time; tests drive the clock by hand:
//!
//! ```rust
//! use backerboard_core::*;
//! use web_time::Duration;
//!
//! let scheduler = Scheduler::new();
//! let fired = Signal::new();
//! let out = fired.clone();
//! scheduler.schedule(Duration::from_secs(3), move || out.emit(()));
//!
//! scheduler.advance();
//! assert_eq!(fired.last(), None); // not due yet
//! scheduler.advance_by(Duration::from_secs(3));
//! assert_eq!(fired.last(), Some(()));
//! ```
//!
//! Nothing here spawns threads or sleeps; production hosts pump the
//! scheduler from their run loop, tests call `advance`/`advance_by`.

pub mod scheduler;
pub mod signal;
pub mod testing;
mod tests;

pub use scheduler::*;
pub use signal::*;
pub use testing::*;
