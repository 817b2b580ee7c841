//! Higher-order timing around function calls.
//!
//! These wrappers run a callable between `start` and `end` on a metric
//! store. Failures pass through unchanged: a wrapped callable returning
//! `Err` still gets its timing finalized before the error is handed back,
//! exactly once per invocation.

use crate::store::{end_measure, start_measure, MetricStore};
use std::future::Future;

/// Time a synchronous callable under `name` against the given store.
///
/// The callable's return value is passed through unchanged.
pub fn measure_sync<F, R>(store: &mut MetricStore, name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    store.start(name);
    let result = f();
    store.end(name);
    result
}

/// Time an asynchronous callable under `name` against the given store.
///
/// The wrapper suspends until the produced future resolves; the measurement
/// is ended after the output (success or failure) is available, so other
/// work may interleave between `start` and `end`. Reusing the same `name`
/// concurrently is a race; use distinct names per concurrent invocation.
pub async fn measure<F, Fut>(store: &mut MetricStore, name: &str, f: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    store.start(name);
    let output = f().await;
    store.end(name);
    output
}

/// Time a synchronous callable under `name` against the global store.
pub fn measure_sync_global<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    start_measure(name);
    let result = f();
    let _ = end_measure(name);
    result
}

/// Time an asynchronous callable under `name` against the global store.
///
/// The global store's lock is only held inside `start`/`end`, never across
/// the await.
pub async fn measure_global<F, Fut>(name: &str, f: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    start_measure(name);
    let output = f().await;
    let _ = end_measure(name);
    output
}

/// RAII measurement against the global store.
///
/// Starts on creation and ends on drop, so a panic unwinding through the
/// guarded scope still finalizes the timing.
///
/// # Example
///
/// ```rust
/// use perfmon::MeasureGuard;
///
/// fn save_document() {
///     let _guard = MeasureGuard::new("save_document");
///     // ... work ...
/// } // measurement ends here
/// ```
pub struct MeasureGuard {
    name: String,
    finished: bool,
}

impl MeasureGuard {
    /// Start a measurement under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        start_measure(&name);
        Self {
            name,
            finished: false,
        }
    }

    /// Get the measurement name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// End the measurement now and return its duration in milliseconds.
    pub fn finish(mut self) -> Option<f64> {
        self.finished = true;
        end_measure(&self.name)
    }
}

impl Drop for MeasureGuard {
    fn drop(&mut self) {
        if !self.finished {
            let _ = end_measure(&self.name);
        }
    }
}

/// Macro for scope timing against the global store.
///
/// # Example
///
/// ```rust
/// use perfmon::measure_scope;
///
/// fn do_work() {
///     measure_scope!("work");
///     // ... work ...
/// } // measurement ends here
/// ```
#[macro_export]
macro_rules! measure_scope {
    ($name:expr) => {
        let _guard = $crate::MeasureGuard::new($name);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::get_metric;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_measure_sync_passes_value_through() {
        let mut store = MetricStore::new();
        let value = measure_sync(&mut store, "sum", || 2 + 2);

        assert_eq!(value, 4);
        let record = store.get("sum").unwrap();
        assert!(record.duration_ms.unwrap() >= 0.0);
    }

    #[test]
    fn test_measure_sync_error_passes_through() {
        let mut store = MetricStore::new();
        let result: Result<i32, String> =
            measure_sync(&mut store, "failing", || Err("boom".to_string()));

        assert_eq!(result.unwrap_err(), "boom");
        // Timing finalized despite the failure.
        assert!(store.get("failing").unwrap().is_finished());
    }

    #[tokio::test]
    async fn test_measure_async_returns_value() {
        let mut store = MetricStore::new();
        let value = measure(&mut store, "op", || async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            42
        })
        .await;

        assert_eq!(value, 42);
        let record = store.get("op").unwrap();
        assert!(record.duration_ms.unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_measure_async_error_passes_through() {
        let mut store = MetricStore::new();
        let result: Result<i32, String> = measure(&mut store, "failing", || async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err("boom".to_string())
        })
        .await;

        assert_eq!(result.unwrap_err(), "boom");
        assert!(store.get("failing").unwrap().is_finished());
    }

    #[tokio::test]
    async fn test_measure_global() {
        let value =
            measure_global("measure_global_op", || async { "done" }).await;

        assert_eq!(value, "done");
        let record = get_metric("measure_global_op").unwrap();
        assert!(record.is_finished());
    }

    #[test]
    fn test_guard_ends_on_drop() {
        {
            let _guard = MeasureGuard::new("measure_guard_drop");
            sleep(Duration::from_millis(2));
        }

        let record = get_metric("measure_guard_drop").unwrap();
        assert!(record.is_finished());
        assert!(record.duration_ms.unwrap() >= 0.0);
    }

    #[test]
    fn test_guard_finish_returns_duration() {
        let guard = MeasureGuard::new("measure_guard_finish");
        assert_eq!(guard.name(), "measure_guard_finish");
        sleep(Duration::from_millis(2));
        let duration = guard.finish().unwrap();

        assert!(duration >= 0.0);
        // Finish ends exactly once; the record is not re-ended by drop.
        let record = get_metric("measure_guard_finish").unwrap();
        assert_eq!(record.duration_ms, Some(duration));
    }

    #[test]
    fn test_guard_finalizes_on_panic() {
        let result = std::panic::catch_unwind(|| {
            let _guard = MeasureGuard::new("measure_guard_panic");
            panic!("boom");
        });

        assert!(result.is_err());
        assert!(get_metric("measure_guard_panic").unwrap().is_finished());
    }

    #[test]
    fn test_measure_scope_macro() {
        {
            measure_scope!("measure_scope_macro");
            sleep(Duration::from_millis(2));
        }

        assert!(get_metric("measure_scope_macro").unwrap().is_finished());
    }
}
