//! Observability Module - Prometheus metrics collection and export

pub mod metrics;
