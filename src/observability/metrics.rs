//! Prometheus Metrics Module
//!
//! Metrics are exposed via the `/metrics` endpoint for Prometheus scraping.

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Once;

static METRICS_REGISTERED: Once = Once::new();

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Times the artifact pair was actually loaded from disk. Stays at 1
    /// for a healthy process.
    pub static ref ARTIFACT_LOADS: Counter = Counter::new(
        "menuscore_artifact_loads_total",
        "Number of times the model artifacts were loaded from disk"
    ).expect("Failed to create artifact_loads metric");

    /// Predictions served, by outcome
    pub static ref PREDICTIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("menuscore_predictions_total", "Total prediction requests handled"),
        &["status"]
    ).expect("Failed to create predictions_total metric");

    /// Prediction handling latency in seconds
    pub static ref PREDICTION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new("menuscore_prediction_duration_seconds", "Prediction handling duration")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5])
    ).expect("Failed to create prediction_duration metric");
}

pub struct MetricsCollector;

impl MetricsCollector {
    /// Register all metrics with the registry. Idempotent, so parallel
    /// tests and repeated server starts in one process are safe.
    pub fn register_default_metrics() -> Result<(), prometheus::Error> {
        METRICS_REGISTERED.call_once(|| {
            let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
                Box::new(ARTIFACT_LOADS.clone()),
                Box::new(PREDICTIONS_TOTAL.clone()),
                Box::new(PREDICTION_DURATION.clone()),
            ];
            for metric in metrics {
                if let Err(e) = REGISTRY.register(metric) {
                    tracing::warn!("Failed to register metric: {}", e);
                }
            }
        });
        Ok(())
    }

    /// Export all metrics in Prometheus text format.
    pub fn export_metrics() -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = REGISTRY.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;

        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
