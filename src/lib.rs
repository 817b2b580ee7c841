//! In-Process Timing Instrumentation
//!
//! This crate times named operations (start/end pairs), logs their durations,
//! and offers higher-order wrappers to auto-time function calls and UI render
//! passes:
//!
//! - A bounded [`MetricStore`] of named timing records, with a process-wide
//!   default instance and oldest-first eviction at 1000 records
//! - Call wrappers ([`measure()`] and [`measure_sync()`]) and an RAII guard
//!   with the [`measure_scope!`] macro
//! - A render wrapper ([`with_render_timing`]) for log-only per-pass timing
//! - A threshold logger ([`log_if_slow`]) that warns when an operation runs
//!   longer than 100ms
//!
//! All logging goes through `tracing` at debug/info/warn levels.
//!
//! # Example
//!
//! ```rust
//! use perfmon::{start_measure, end_measure, get_metric};
//!
//! start_measure("open_file");
//! // ... work ...
//! let duration_ms = end_measure("open_file");
//! assert!(duration_ms.unwrap() >= 0.0);
//! assert!(get_metric("open_file").unwrap().is_finished());
//! ```
//!
//! # Concurrency
//!
//! The global store is guarded by a mutex, so each operation is atomic, but
//! concurrent reuse of the same measurement name is a race (the last `start`
//! wins). Callers expecting concurrent use of one logical operation should
//! include a unique suffix per invocation.

mod measure;
mod render;
mod store;
mod threshold;

pub use measure::*;
pub use render::*;
pub use store::*;
pub use threshold::*;

/// Re-export for convenience
pub use std::time::{Duration, Instant};
