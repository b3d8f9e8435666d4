//! Error types for artifact loading and prediction requests.

use axum::http::StatusCode;
use std::path::PathBuf;

/// Errors raised while loading the serialized model artifacts at startup.
///
/// All of these are fatal: the server refuses to start without a usable
/// pipeline and label encoder, and no retry is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact file not found: {path}")]
    Missing { path: PathBuf },

    #[error("artifact file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact is internally inconsistent: {0}")]
    Invalid(String),

    #[error("failed to read artifact file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while handling a single prediction request.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("unknown restaurant id '{0}'")]
    UnknownRestaurant(String),

    #[error("unknown menu category '{0}'")]
    UnknownCategory(String),

    #[error("price must be a non-negative finite number, got {0}")]
    InvalidPrice(f64),

    #[error("ingredient count must be at least 1")]
    InvalidIngredientCount,

    #[error("menu item name length must be at least 1")]
    InvalidNameLength,

    #[error("predicted class index {index} is outside the encoder's {len} classes")]
    ClassIndexOutOfRange { index: usize, len: usize },

    #[error("model artifacts unavailable: {0}")]
    Artifacts(#[from] ArtifactError),
}

impl PredictError {
    /// HTTP status for this error at the API boundary. Constraint and
    /// vocabulary violations are the caller's fault; everything else is a
    /// server-side inference failure surfaced as-is.
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::UnknownRestaurant(_)
            | PredictError::UnknownCategory(_)
            | PredictError::InvalidPrice(_)
            | PredictError::InvalidIngredientCount
            | PredictError::InvalidNameLength => StatusCode::UNPROCESSABLE_ENTITY,
            PredictError::ClassIndexOutOfRange { .. } | PredictError::Artifacts(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
