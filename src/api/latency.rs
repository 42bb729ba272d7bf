//! In-memory latency histogram for engine instrumentation.
//! Records normalization/projection compute time per request.

use std::sync::Mutex;
use std::time::Duration;

/// Point-in-time percentile readout. All values in microseconds.
#[derive(Debug, Clone, Copy)]
pub struct LatencySnapshot {
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
    pub samples: u64,
}

/// Shared latency stats. Handlers record, the stats endpoint reads.
pub struct LatencyStats {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

impl LatencyStats {
    /// Tracks 1us to 10s at 3 significant figures. Engine work is pure
    /// computation, so anything past milliseconds already means trouble.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 10_000_000, 3)
            .expect("valid histogram bounds");
        Self {
            inner: Mutex::new(histogram),
        }
    }

    /// Record one request's compute time, clamped to the histogram bounds.
    pub fn record(&self, elapsed: Duration) {
        let us = elapsed.as_micros().min(u128::from(u64::MAX)) as u64;
        if let Ok(mut h) = self.inner.lock() {
            h.saturating_record(us);
        }
    }

    pub fn snapshot(&self) -> LatencySnapshot {
        let empty = LatencySnapshot {
            p50_us: None,
            p95_us: None,
            p99_us: None,
            samples: 0,
        };
        let Ok(h) = self.inner.lock() else {
            return empty;
        };
        if h.is_empty() {
            return empty;
        }
        LatencySnapshot {
            p50_us: Some(h.value_at_quantile(0.5)),
            p95_us: Some(h.value_at_quantile(0.95)),
            p99_us: Some(h.value_at_quantile(0.99)),
            samples: h.len(),
        }
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}
