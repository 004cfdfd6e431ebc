use std::collections::HashMap;
use std::sync::Arc;
use lazy_static::lazy_static;
use parking_lot::Mutex;

pub const REQUESTS_FORWARDED: &str = "requests_forwarded";
pub const REQUESTS_REJECTED: &str = "requests_rejected";
pub const TRANSPORT_FAILURES: &str = "transport_failures";
pub const HEALTH_CHECKS: &str = "health_checks";

/// Request counters for the gateway
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_counter(&self, name: &str) {
        let mut counters = self.counters.lock();
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.lock().get(name).copied().unwrap_or(0)
    }
}

lazy_static! {
    pub static ref METRICS: MetricsRegistry = MetricsRegistry::new();
}
