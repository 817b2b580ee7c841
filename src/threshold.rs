//! Stateless slow-operation logging.

use std::time::Instant;

/// Elapsed time in milliseconds above which an operation is logged as slow.
pub const SLOW_THRESHOLD_MS: f64 = 100.0;

/// Log the elapsed time since `start` and warn if it exceeds
/// [`SLOW_THRESHOLD_MS`].
///
/// Always emits an info line with the elapsed time; additionally emits a
/// warning when the operation was slow. The caller supplies `start`; this
/// function never starts a timer itself and keeps no state. Returns the
/// elapsed milliseconds.
pub fn log_if_slow(operation: &str, start: Instant) -> f64 {
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        target: "perfmon::threshold",
        elapsed_ms,
        "{} - {:.2}ms",
        operation,
        elapsed_ms
    );

    if elapsed_ms > SLOW_THRESHOLD_MS {
        tracing::warn!(
            target: "perfmon::threshold",
            elapsed_ms,
            "{} took {:.2}ms to execute",
            operation,
            elapsed_ms
        );
    }

    elapsed_ms
}
