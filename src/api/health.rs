//! Shared health state for the /health endpoint.
//! Updated by the request handlers, read by GET /health.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-level counters. Handlers record, the health endpoint reads.
pub struct HealthState {
    started_at_ns: AtomicU64,
    normalize_requests: AtomicU64,
    override_requests: AtomicU64,
    projection_requests: AtomicU64,
    /// Nanosecond timestamp of the last handled request (0 = none yet).
    last_request_at_ns: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at_ns: AtomicU64::new(now_ns()),
            normalize_requests: AtomicU64::new(0),
            override_requests: AtomicU64::new(0),
            projection_requests: AtomicU64::new(0),
            last_request_at_ns: AtomicU64::new(0),
        }
    }

    pub fn record_normalize(&self) {
        self.normalize_requests.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn record_overrides(&self) {
        self.override_requests.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn record_projection(&self) {
        self.projection_requests.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn normalize_requests(&self) -> u64 {
        self.normalize_requests.load(Ordering::Relaxed)
    }

    pub fn override_requests(&self) -> u64 {
        self.override_requests.load(Ordering::Relaxed)
    }

    pub fn projection_requests(&self) -> u64 {
        self.projection_requests.load(Ordering::Relaxed)
    }

    pub fn last_request_at_ns(&self) -> u64 {
        self.last_request_at_ns.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        now_ns()
            .saturating_sub(self.started_at_ns.load(Ordering::Relaxed))
            / 1_000_000_000
    }

    fn touch(&self) {
        self.last_request_at_ns.store(now_ns(), Ordering::Relaxed);
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
