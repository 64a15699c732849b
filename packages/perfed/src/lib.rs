#![cfg_attr(docsrs, feature(doc_cfg))]

//! Named wall-clock timers for instrumenting code, with aggregation and export.
//!
//! The core functionality includes:
//! - [`Timer`] - Measures one named interval against a monotonic clock
//! - [`TimerSpan`] - Stops its timer when dropped, for scoped measurement
//! - [`TimerCollection`] - Groups timers, renders them as a table, computes a [`Summary`]
//!   and persists them as CSV or JSON
//! - [`TimerRegistry`] - Owns one collection per name and hands out [`Decorator`]s that time
//!   every call made through them
//!
//! All handles are single-threaded; the compiler rejects sending them to another thread.
//!
//! This package is a development tool for finding out where time goes, not a benchmarking
//! harness.
//!
//! # Simple usage
//!
//! ```
//! use perfed::{TimeUnit, TimerCollection};
//!
//! let mut timers = TimerCollection::new("startup");
//!
//! {
//!     let _span = timers.measure("load_config").unwrap();
//!     // Load the configuration.
//! }
//!
//! let sum = timers
//!     .time("compute", || (0..10_000_u64).sum::<u64>())
//!     .unwrap();
//! assert_eq!(sum, 49_995_000);
//!
//! timers.print_to_stdout(TimeUnit::Milliseconds);
//! ```
//!
//! # Timing every call of a function
//!
//! ```
//! use perfed::{TimeUnit, TimerRegistry};
//!
//! let mut registry = TimerRegistry::new();
//! let mut square = registry.register("square").unwrap().wrap(|x: u64| x * x);
//!
//! for i in 0..5 {
//!     square(i).unwrap();
//! }
//!
//! let collection = registry.get("square").unwrap();
//! let collection = collection.borrow();
//! assert_eq!(collection.len(), 5);
//!
//! let summary = collection.summary(TimeUnit::Nanoseconds).unwrap();
//! assert!(summary.min() <= summary.average());
//! assert!(summary.average() <= summary.max());
//! ```
//!
//! # Exporting
//!
//! [`TimerCollection::persist()`] writes `name,duration` CSV lines or a single-line JSON
//! object to a file, opened according to a [`WriteMode`]:
//!
//! ```no_run
//! use perfed::{ExportFormat, TimeUnit, TimerCollection, WriteMode};
//!
//! let mut timers = TimerCollection::new("export");
//! timers.time("work", || ()).unwrap();
//!
//! timers
//!     .persist("timings.csv", ExportFormat::Csv, WriteMode::Append, TimeUnit::Seconds)
//!     .unwrap();
//! ```

mod cli;
mod collection;
mod error;
mod export;
mod pal;
mod registry;
mod span;
mod summary;
mod table;
mod timer;
mod unit;

pub use cli::*;
pub use collection::*;
pub use error::Error;
pub(crate) use error::Result;
pub use export::{ExportFormat, WriteMode};
pub use registry::*;
pub use span::*;
pub use summary::*;
pub use table::*;
pub use timer::{Timer, TimerState};
pub use unit::*;
