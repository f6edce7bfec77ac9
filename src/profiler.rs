// Per-invocation wall-clock accounting. One `OpTimings` lives for a single
// pipeline run and is dropped with it; nothing here is process-global.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::time::Instant;

/// Stopwatch for one operation.
pub struct Timer {
    started: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed seconds, rounded to two decimals.
    pub fn elapsed_secs(&self) -> f64 {
        let secs = self.started.elapsed().as_secs_f64();
        (secs * 100.0).round() / 100.0
    }
}

/// Named duration buckets for one aggregation run. Fan-out futures record
/// concurrently, hence the Mutex.
#[derive(Debug, Default)]
pub struct OpTimings {
    buckets: Mutex<HashMap<&'static str, Vec<f64>>>,
}

impl OpTimings {
    pub fn record(&self, op: &'static str, secs: f64) {
        self.buckets.lock().unwrap().entry(op).or_default().push(secs);
    }

    /// Compact `op=count/total_secs` summary for a single log line.
    pub fn summary(&self) -> String {
        let buckets = self.buckets.lock().unwrap();
        let mut ops: Vec<_> = buckets.iter().collect();
        ops.sort_by_key(|(op, _)| *op);
        ops.iter()
            .map(|(op, samples)| {
                let total: f64 = samples.iter().sum();
                format!("{}={}/{:.2}s", op, samples.len(), total)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
