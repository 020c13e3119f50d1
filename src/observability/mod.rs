//! Observability: request counters and operation timing.
//!
//! Everything here reports through `tracing`; there is no exporter.

pub mod metrics;

pub use metrics::{ContactMutation, MetricsTracker, Timer};
