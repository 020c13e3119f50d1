//! Request and contact-activity counters.
//!
//! Counters are process-local and reported through `tracing`; the summary is
//! logged when the server shuts down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared counters for the running server. Cloning shares the counters.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    http_requests_total: Arc<AtomicU64>,
    http_errors_total: Arc<AtomicU64>,
    contacts_created_total: Arc<AtomicU64>,
    contacts_updated_total: Arc<AtomicU64>,
    contacts_deleted_total: Arc<AtomicU64>,
    validation_failures_total: Arc<AtomicU64>,
}

/// A contact mutation that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMutation {
    Created,
    Updated,
    Deleted,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            contacts_created_total: Arc::new(AtomicU64::new(0)),
            contacts_updated_total: Arc::new(AtomicU64::new(0)),
            contacts_deleted_total: Arc::new(AtomicU64::new(0)),
            validation_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a served HTTP request. Any 5xx status counts as an error.
    pub fn track_http_request(&self, method: &str, path: &str, status: u16, duration_ms: u128) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);

        if status >= 500 {
            self.http_errors_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            method = %method,
            path = %path,
            status = status,
            duration_ms = duration_ms,
            "HTTP request completed"
        );
    }

    /// Track a completed contact mutation.
    pub fn track_mutation(&self, mutation: ContactMutation) {
        let counter = match mutation {
            ContactMutation::Created => &self.contacts_created_total,
            ContactMutation::Updated => &self.contacts_updated_total,
            ContactMutation::Deleted => &self.contacts_deleted_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Track a form submission rejected by validation.
    pub fn track_validation_failure(&self, form: &str, field_errors: usize) {
        self.validation_failures_total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(form = %form, field_errors = field_errors, "Form rejected");
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn contacts_created_total(&self) -> u64 {
        self.contacts_created_total.load(Ordering::Relaxed)
    }

    pub fn contacts_updated_total(&self) -> u64 {
        self.contacts_updated_total.load(Ordering::Relaxed)
    }

    pub fn contacts_deleted_total(&self) -> u64 {
        self.contacts_deleted_total.load(Ordering::Relaxed)
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.validation_failures_total.load(Ordering::Relaxed)
    }

    /// Get the HTTP error rate (0.0 to 1.0).
    pub fn http_error_rate(&self) -> f64 {
        let errors = self.http_errors_total() as f64;
        let total = self.http_requests_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            errors / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             HTTP Requests: {}\n\
             HTTP Errors: {} ({:.2}% error rate)\n\
             Contacts Created: {}\n\
             Contacts Updated: {}\n\
             Contacts Deleted: {}\n\
             Validation Failures: {}",
            self.http_requests_total(),
            self.http_errors_total(),
            self.http_error_rate() * 100.0,
            self.contacts_created_total(),
            self.contacts_updated_total(),
            self.contacts_deleted_total(),
            self.validation_failures_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Finish the timer with a specific status.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::trace!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}
