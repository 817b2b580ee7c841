//! Bounded registry of named timing records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

/// Maximum number of records a store holds before evicting the oldest one.
pub const MAX_CAPACITY: usize = 1000;

/// Global store instance
static GLOBAL_STORE: OnceLock<Mutex<MetricStore>> = OnceLock::new();

/// Get the global metric store.
///
/// This is a thread-safe singleton that lives for the process lifetime.
/// Each operation locks the mutex, so individual start/end calls are atomic;
/// reusing the same measurement name from parallel contexts is still a race
/// (the last `start` wins) and is not supported.
pub fn global_store() -> &'static Mutex<MetricStore> {
    GLOBAL_STORE.get_or_init(|| Mutex::new(MetricStore::new()))
}

/// One named timing interval.
///
/// `end_ms` and `duration_ms` are absent until the measurement is ended.
/// Timestamps are milliseconds since the owning store was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Measurement name, unique within a store
    pub name: String,
    /// Start timestamp in milliseconds
    pub start_ms: f64,
    /// End timestamp in milliseconds, if ended
    pub end_ms: Option<f64>,
    /// Elapsed time in milliseconds, if ended
    pub duration_ms: Option<f64>,
}

impl MetricRecord {
    /// Check whether this measurement has been ended.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.end_ms.is_some()
    }
}

/// Keyed registry of in-flight and completed timing records.
///
/// Holds at most `capacity` records; starting a new measurement at capacity
/// evicts the record with the smallest start timestamp first. Note the
/// eviction key is *creation* time, not last use, so a long-running unfinished
/// measurement can be evicted while older finished ones survive.
#[derive(Debug)]
pub struct MetricStore {
    records: HashMap<String, MetricRecord>,
    /// Reference point for all timestamps in this store
    epoch: Instant,
    capacity: usize,
}

impl MetricStore {
    /// Create a store with the default capacity of [`MAX_CAPACITY`] records.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            epoch: Instant::now(),
            capacity: MAX_CAPACITY,
        }
    }

    /// Set the maximum number of records to keep.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Milliseconds elapsed since this store was created.
    #[inline]
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Begin a measurement under `name`.
    ///
    /// If the store is at capacity, the record with the smallest start
    /// timestamp is evicted first. Starting a name that is already tracked
    /// overwrites the prior record, losing its start time.
    pub fn start(&mut self, name: &str) {
        if self.records.len() >= self.capacity {
            self.evict_oldest();
        }

        let record = MetricRecord {
            name: name.to_string(),
            start_ms: self.now_ms(),
            end_ms: None,
            duration_ms: None,
        };
        self.records.insert(name.to_string(), record);
    }

    /// End the measurement under `name` and return its duration in
    /// milliseconds.
    ///
    /// Unknown names are a reported miss, not an error: a warning is logged
    /// and `None` is returned. The finished record stays retrievable.
    pub fn end(&mut self, name: &str) -> Option<f64> {
        let now = self.now_ms();
        match self.records.get_mut(name) {
            Some(record) => {
                let duration = now - record.start_ms;
                record.end_ms = Some(now);
                record.duration_ms = Some(duration);

                tracing::debug!(
                    target: "perfmon::store",
                    name,
                    duration_ms = duration,
                    start_ms = record.start_ms,
                    end_ms = now,
                    "measurement completed"
                );

                Some(duration)
            }
            None => {
                tracing::warn!(
                    target: "perfmon::store",
                    "measurement '{}' not found",
                    name
                );
                None
            }
        }
    }

    /// Get the current record for `name`, if tracked.
    pub fn get(&self, name: &str) -> Option<&MetricRecord> {
        self.records.get(name)
    }

    /// Snapshot of all current records, in unspecified order.
    pub fn all(&self) -> Vec<MetricRecord> {
        self.records.values().cloned().collect()
    }

    /// Remove all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records this store keeps.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Serialize a snapshot of all records to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.all())
    }

    /// Remove the record with the smallest start timestamp.
    ///
    /// Ties are broken by map iteration order.
    fn evict_oldest(&mut self) {
        let oldest = self
            .records
            .values()
            .min_by(|a, b| {
                a.start_ms
                    .partial_cmp(&b.start_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|r| r.name.clone());

        if let Some(name) = oldest {
            self.records.remove(&name);
            tracing::trace!(
                target: "perfmon::store",
                name = %name,
                "evicted oldest measurement"
            );
        }
    }
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Begin a measurement under `name` in the global store.
pub fn start_measure(name: &str) {
    if let Ok(mut store) = global_store().lock() {
        store.start(name);
    }
}

/// End the measurement under `name` in the global store.
///
/// Returns the duration in milliseconds, or `None` if the name was never
/// started (or already evicted).
pub fn end_measure(name: &str) -> Option<f64> {
    global_store().lock().ok()?.end(name)
}

/// Get a copy of the record for `name` from the global store.
pub fn get_metric(name: &str) -> Option<MetricRecord> {
    global_store().lock().ok()?.get(name).cloned()
}

/// Snapshot of all records in the global store.
pub fn get_all_metrics() -> Vec<MetricRecord> {
    global_store().lock().map(|store| store.all()).unwrap_or_default()
}

/// Remove all records from the global store.
pub fn clear_metrics() {
    if let Ok(mut store) = global_store().lock() {
        store.clear();
    }
}
