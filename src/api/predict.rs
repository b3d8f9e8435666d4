//! Prediction endpoints.
//!
//! `POST /api/predict` is the form's submit target: it validates the five
//! fields, builds the single feature row in the pipeline's trained column
//! order, runs predict + predict_proba, decodes the label, and returns the
//! class name with per-class confidences. `GET /api/schema` feeds the form
//! its option sets so the UI can never drift from the trained artifact.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::PredictError;
use crate::model::{Classifier, MenuItemQuery, ModelStore};
use crate::observability::metrics::{MetricsCollector, PREDICTIONS_TOTAL, PREDICTION_DURATION};

/// Response envelope for predictions
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confidences: Vec<ClassConfidence>,
}

/// One class with its confidence, in encoder class order.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassConfidence {
    pub class: String,
    /// Raw probability in [0, 1], used by the chart.
    pub probability: f64,
    /// Probability as a percentage to one decimal place, used by the lines.
    pub percent: String,
}

/// Option sets and class list read off the loaded artifacts.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub restaurants: Vec<String>,
    pub categories: Vec<String>,
    pub classes: Vec<String>,
    pub feature_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub artifacts_loaded: bool,
}

fn failure(err: &PredictError) -> (StatusCode, Json<PredictResponse>) {
    (
        err.status(),
        Json(PredictResponse {
            success: false,
            message: err.to_string(),
            predicted_class: None,
            confidences: Vec::new(),
        }),
    )
}

/// POST /api/predict
pub async fn predict(
    State(store): State<Arc<ModelStore>>,
    Json(query): Json<MenuItemQuery>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<PredictResponse>)> {
    let timer = PREDICTION_DURATION.start_timer();

    let result = run_prediction(&store, &query);
    timer.observe_duration();

    match result {
        Ok(response) => {
            PREDICTIONS_TOTAL.with_label_values(&["ok"]).inc();
            info!(
                "Predicted '{}' for {}/{}",
                response.predicted_class.as_deref().unwrap_or("?"),
                query.restaurant_id,
                query.menu_category
            );
            Ok(Json(response))
        }
        Err(err) => {
            let status = if err.status() == StatusCode::UNPROCESSABLE_ENTITY {
                "rejected"
            } else {
                "error"
            };
            PREDICTIONS_TOTAL.with_label_values(&[status]).inc();
            warn!("Prediction failed: {}", err);
            Err(failure(&err))
        }
    }
}

fn run_prediction(
    store: &ModelStore,
    query: &MenuItemQuery,
) -> Result<PredictResponse, PredictError> {
    let artifacts = store.artifacts()?;

    let label = artifacts.pipeline.predict(query)?;
    let proba = artifacts.pipeline.predict_proba(query)?;
    let class_name = artifacts.encoder.inverse_transform(label)?;

    let confidences = artifacts
        .encoder
        .classes()
        .iter()
        .zip(&proba)
        .map(|(class, p)| ClassConfidence {
            class: class.clone(),
            probability: *p,
            percent: format!("{:.1}", p * 100.0),
        })
        .collect();

    Ok(PredictResponse {
        success: true,
        message: format!("Predicted Profitability: {}", class_name),
        predicted_class: Some(class_name.to_string()),
        confidences,
    })
}

/// GET /api/schema
pub async fn schema(
    State(store): State<Arc<ModelStore>>,
) -> Result<Json<SchemaResponse>, (StatusCode, String)> {
    let artifacts = store
        .artifacts()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(SchemaResponse {
        restaurants: artifacts.pipeline.restaurants().to_vec(),
        categories: artifacts.pipeline.categories().to_vec(),
        classes: artifacts.encoder.classes().to_vec(),
        feature_names: artifacts.pipeline.feature_names().to_vec(),
    }))
}

/// GET /health
pub async fn health(State(store): State<Arc<ModelStore>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        artifacts_loaded: store.load_count() > 0,
    })
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    match MetricsCollector::export_metrics() {
        Ok(metrics) => (StatusCode::OK, metrics).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to export metrics: {}", e),
        )
            .into_response(),
    }
}
