//! Prometheus metrics for observability and monitoring.
//!
//! The exporter installs a global recorder once per process and keeps the
//! handle used to render the `/metrics` endpoint.
//!
//! # Example
//!
//! ```rust,no_run
//! use ticketdesk_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exporter = MetricsExporter::new();
//! exporter.install()?;
//!
//! if let Some(body) = exporter.render() {
//!     println!("{body}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other crates
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus exporter.
///
/// Cheap to clone once installed; clones share the same handle.
#[derive(Clone, Default)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// Create an exporter that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Register metric descriptions and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., by another test), this
    /// succeeds without a handle and [`MetricsExporter::render`] returns `None`.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[
                    0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
                ],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                register_metrics();
                self.handle = Some(handle);
                tracing::info!("Prometheus recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if this exporter did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register descriptions for the store metrics.
fn register_metrics() {
    describe_counter!(
        "store_commands_total",
        "Total number of actions processed by the store"
    );
    describe_counter!(
        "store_rejected_actions_total",
        "Actions rejected because the store was shutting down"
    );
    describe_counter!(
        "store_shutdown_initiated_total",
        "Number of graceful shutdowns started"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time spent inside the reducer while holding the state lock"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one reducer run.
    pub fn record_command(duration: Duration) {
        counter!("store_commands_total").increment(1);
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
    }
}
