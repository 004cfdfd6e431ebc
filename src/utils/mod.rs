//! Utility module: errors, logging and request counters.

pub mod errors;
pub mod metrics;
pub mod logging;

pub use errors::{GatewayError, Result};
pub use metrics::{MetricsRegistry, METRICS};
pub use logging::init_logging;
