//! Fitted classification pipeline artifact.
//!
//! The pipeline is treated as an opaque black box everywhere else in the
//! crate: callers hand it a [`MenuItemQuery`] and get back a class index or
//! a probability vector through the [`Classifier`] trait. The internals
//! below exist only to deserialize the artifact and evaluate it; nothing
//! outside this module depends on the pipeline being a linear model.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PredictError};

/// One menu item as submitted through the form. Transient: built per
/// request, dropped after the response is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemQuery {
    pub restaurant_id: String,
    pub menu_category: String,
    pub price: f64,
    pub ingredient_count: u32,
    pub name_length: u32,
}

impl MenuItemQuery {
    /// Range constraints mirrored from the form widgets. Vocabulary
    /// membership is checked against the pipeline's trained categories
    /// during encoding, not here.
    pub fn validate(&self) -> Result<(), PredictError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PredictError::InvalidPrice(self.price));
        }
        if self.ingredient_count < 1 {
            return Err(PredictError::InvalidIngredientCount);
        }
        if self.name_length < 1 {
            return Err(PredictError::InvalidNameLength);
        }
        Ok(())
    }
}

/// Narrow capability interface over whatever concrete model the artifact
/// holds. `predict` returns a class index into the label encoder's class
/// list; `predict_proba` returns one probability per class in that order.
pub trait Classifier: Send + Sync {
    fn predict(&self, query: &MenuItemQuery) -> Result<usize, PredictError>;
    fn predict_proba(&self, query: &MenuItemQuery) -> Result<Vec<f64>, PredictError>;
}

/// Standard-scaler parameters for the three numeric features, in the
/// trained column order (price, ingredient count, name length).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

/// The serialized fitted pipeline: feature schema, categorical
/// vocabularies, scaler parameters, and multinomial-logistic weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedPipeline {
    /// Trained feature-name order; rows are always built in this order.
    pub feature_names: Vec<String>,
    pub restaurant_vocab: Vec<String>,
    pub category_vocab: Vec<String>,
    pub scaler: ScalerParams,
    /// One row of weights per class, over the encoded feature vector.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl FittedPipeline {
    /// Length of the encoded feature vector: one-hot restaurants, one-hot
    /// categories, then the three scaled numerics.
    fn encoded_len(&self) -> usize {
        self.restaurant_vocab.len() + self.category_vocab.len() + 3
    }

    pub fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    pub fn restaurants(&self) -> &[String] {
        &self.restaurant_vocab
    }

    pub fn categories(&self) -> &[String] {
        &self.category_vocab
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Shape checks run once at load time so inference never has to.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.restaurant_vocab.is_empty() || self.category_vocab.is_empty() {
            return Err(ArtifactError::Invalid(
                "pipeline has an empty categorical vocabulary".to_string(),
            ));
        }
        if self.feature_names.len() != 5 {
            return Err(ArtifactError::Invalid(format!(
                "pipeline expects 5 feature names, artifact lists {}",
                self.feature_names.len()
            )));
        }
        if self.scaler.means.len() != 3 || self.scaler.stds.len() != 3 {
            return Err(ArtifactError::Invalid(
                "scaler must carry exactly 3 means and 3 stds".to_string(),
            ));
        }
        if self.scaler.stds.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
            return Err(ArtifactError::Invalid(
                "scaler stds must be positive and finite".to_string(),
            ));
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(ArtifactError::Invalid(format!(
                "{} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        if self.intercepts.len() < 2 {
            return Err(ArtifactError::Invalid(
                "pipeline must discriminate at least 2 classes".to_string(),
            ));
        }
        let expected = self.encoded_len();
        for (i, row) in self.coefficients.iter().enumerate() {
            if row.len() != expected {
                return Err(ArtifactError::Invalid(format!(
                    "coefficient row {} has {} weights, expected {}",
                    i,
                    row.len(),
                    expected
                )));
            }
        }
        Ok(())
    }

    /// Build the encoded single-row input: one-hot categoricals in vocab
    /// order followed by the scaled numerics in trained column order.
    fn encode(&self, query: &MenuItemQuery) -> Result<Vec<f64>, PredictError> {
        query.validate()?;

        let mut row = vec![0.0; self.encoded_len()];

        let r = self
            .restaurant_vocab
            .iter()
            .position(|v| v == &query.restaurant_id)
            .ok_or_else(|| PredictError::UnknownRestaurant(query.restaurant_id.clone()))?;
        row[r] = 1.0;

        let c = self
            .category_vocab
            .iter()
            .position(|v| v == &query.menu_category)
            .ok_or_else(|| PredictError::UnknownCategory(query.menu_category.clone()))?;
        row[self.restaurant_vocab.len() + c] = 1.0;

        let numerics = [
            query.price,
            f64::from(query.ingredient_count),
            f64::from(query.name_length),
        ];
        let base = self.restaurant_vocab.len() + self.category_vocab.len();
        for (i, x) in numerics.iter().enumerate() {
            row[base + i] = (x - self.scaler.means[i]) / self.scaler.stds[i];
        }

        Ok(row)
    }

    /// Per-class linear scores (logits) for the encoded row.
    fn scores(&self, row: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, b)| b + weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>())
            .collect()
    }
}

impl Classifier for FittedPipeline {
    fn predict(&self, query: &MenuItemQuery) -> Result<usize, PredictError> {
        let scores = self.scores(&self.encode(query)?);
        // Ties break toward the lower index, matching argmax convention.
        let (index, _) = scores
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, s)| {
                if *s > best.1 {
                    (i, *s)
                } else {
                    best
                }
            });
        Ok(index)
    }

    fn predict_proba(&self, query: &MenuItemQuery) -> Result<Vec<f64>, PredictError> {
        let scores = self.scores(&self.encode(query)?);
        // Max-subtracted softmax; keeps exp() bounded for extreme logits.
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> FittedPipeline {
        FittedPipeline {
            feature_names: vec![
                "RestaurantID".into(),
                "MenuCategory".into(),
                "Price".into(),
                "IngredientCount".into(),
                "MenuItemLength".into(),
            ],
            restaurant_vocab: vec!["R001".into(), "R002".into(), "R003".into()],
            category_vocab: vec![
                "Appetizers".into(),
                "Beverages".into(),
                "Desserts".into(),
                "Main Course".into(),
            ],
            scaler: ScalerParams {
                means: vec![15.0, 6.0, 12.0],
                stds: vec![8.0, 3.0, 5.0],
            },
            coefficients: vec![
                vec![0.4, -0.1, 0.0, 0.2, -0.3, 0.1, 0.5, 1.2, 0.6, 0.1],
                vec![-0.2, 0.3, 0.1, -0.4, 0.2, 0.0, -0.1, -1.0, -0.5, -0.2],
                vec![-0.2, -0.2, -0.1, 0.2, 0.1, -0.1, -0.4, -0.2, -0.1, 0.1],
            ],
            intercepts: vec![0.1, -0.2, 0.1],
        }
    }

    fn query() -> MenuItemQuery {
        MenuItemQuery {
            restaurant_id: "R001".into(),
            menu_category: "Main Course".into(),
            price: 12.50,
            ingredient_count: 5,
            name_length: 14,
        }
    }

    #[test]
    fn probabilities_form_a_simplex() {
        let proba = pipeline().predict_proba(&query()).unwrap();
        assert_eq!(proba.len(), 3);
        assert!(proba.iter().all(|p| *p >= 0.0 && *p <= 1.0));
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {}", sum);
    }

    #[test]
    fn predict_matches_argmax_of_proba() {
        let p = pipeline();
        let label = p.predict(&query()).unwrap();
        let proba = p.predict_proba(&query()).unwrap();
        let argmax = proba
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(label, argmax);
    }

    #[test]
    fn prediction_is_deterministic() {
        let p = pipeline();
        assert_eq!(
            p.predict_proba(&query()).unwrap(),
            p.predict_proba(&query()).unwrap()
        );
        assert_eq!(p.predict(&query()).unwrap(), p.predict(&query()).unwrap());
    }

    #[test]
    fn minimum_widget_values_predict_cleanly() {
        let q = MenuItemQuery {
            price: 0.0,
            ingredient_count: 1,
            name_length: 1,
            ..query()
        };
        let p = pipeline();
        assert!(p.predict(&q).is_ok());
        let sum: f64 = p.predict_proba(&q).unwrap().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_categories_are_rejected() {
        let p = pipeline();
        let q = MenuItemQuery {
            restaurant_id: "R999".into(),
            ..query()
        };
        assert!(matches!(
            p.predict(&q),
            Err(PredictError::UnknownRestaurant(_))
        ));

        let q = MenuItemQuery {
            menu_category: "Sides".into(),
            ..query()
        };
        assert!(matches!(
            p.predict_proba(&q),
            Err(PredictError::UnknownCategory(_))
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let q = MenuItemQuery {
            price: -0.01,
            ..query()
        };
        assert!(matches!(
            pipeline().predict(&q),
            Err(PredictError::InvalidPrice(_))
        ));
    }

    #[test]
    fn extreme_logits_stay_finite() {
        let mut p = pipeline();
        p.coefficients[0] = vec![500.0; 10];
        let proba = p.predict_proba(&query()).unwrap();
        assert!(proba.iter().all(|v| v.is_finite()));
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn validate_catches_shape_mismatch() {
        let mut p = pipeline();
        p.coefficients[1].pop();
        assert!(p.validate().is_err());

        let mut p = pipeline();
        p.intercepts.pop();
        assert!(p.validate().is_err());

        assert!(pipeline().validate().is_ok());
    }
}
