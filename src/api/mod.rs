//! API Module - HTTP surface of the predictor
//!
//! One page, one prediction endpoint, plus health and metrics.

pub mod predict;
pub mod ui;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::model::ModelStore;

/// Build the complete application router.
pub fn router(store: Arc<ModelStore>) -> Router {
    Router::new()
        .route("/", get(ui::serve_app))
        .route("/api/schema", get(predict::schema))
        .route("/api/predict", post(predict::predict))
        .route("/health", get(predict::health))
        .route("/metrics", get(predict::metrics_handler))
        .with_state(store)
}
