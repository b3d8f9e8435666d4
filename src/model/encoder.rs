//! Label encoder artifact.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PredictError};

/// Bidirectional mapping between class indices and human-readable class
/// names, deserialized from `profitability_label_encoder.json`.
///
/// The class order here is the order the pipeline's probability vector is
/// aligned with; nothing may reorder it after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Class names in pipeline order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Map a predicted class index back to its human-readable name.
    pub fn inverse_transform(&self, index: usize) -> Result<&str, PredictError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(PredictError::ClassIndexOutOfRange {
                index,
                len: self.classes.len(),
            })
    }

    /// Sanity checks run once at load time.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Invalid(
                "label encoder has no classes".to_string(),
            ));
        }
        for (i, a) in self.classes.iter().enumerate() {
            if self.classes[i + 1..].contains(a) {
                return Err(ArtifactError::Invalid(format!(
                    "label encoder has duplicate class '{}'",
                    a
                )));
            }
        }
        Ok(())
    }
}
