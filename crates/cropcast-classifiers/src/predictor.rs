//! Serving-side prediction over an installed model.
//!
//! `ModelHandle` is a single-assignment container: the model is installed
//! once, after training or a successful restore, and shared read-only by
//! every predict call. A handle with nothing installed answers every
//! request with `ModelUnavailable`; there is no lazy reload.
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::features::FeatureVector;
use crate::models::forest::ClassifierModel;

/// Write-once holder for the restored/fitted model.
#[derive(Debug, Default)]
pub struct ModelHandle {
    slot: OnceLock<ClassifierModel>,
}

impl ModelHandle {
    /// A handle with no model; every predict call fails until `install`.
    pub fn empty() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    pub fn with_model(model: ClassifierModel) -> Self {
        let handle = Self::empty();
        let _ = handle.slot.set(model);
        handle
    }

    /// Install the fitted model. Fails if one is already installed.
    pub fn install(&self, model: ClassifierModel) -> Result<(), CropError> {
        self.slot
            .set(model)
            .map_err(|_| CropError::Config("a model is already installed in this handle".to_string()))
    }

    pub fn get(&self) -> Result<&ClassifierModel, CropError> {
        self.slot.get().ok_or(CropError::ModelUnavailable)
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// Inference request at the serving boundary; field names match the JSON
/// contract and map in-order onto the canonical feature schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CropRequest {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl From<CropRequest> for FeatureVector {
    fn from(request: CropRequest) -> Self {
        FeatureVector {
            nitrogen: request.nitrogen,
            phosphorus: request.phosphorus,
            potassium: request.potassium,
            temperature: request.temperature,
            humidity: request.humidity,
            ph: request.ph,
            rainfall: request.rainfall,
        }
    }
}

/// One prediction per inference call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub crop: String,
    /// Share of trees voting for the winning crop, 0-100.
    pub confidence: f64,
    pub description: String,
}

/// Predict the optimal crop for one feature vector.
///
/// # Errors
///
/// `ModelUnavailable` when no model was installed in `handle`;
/// `InvalidFeature` when any field is non-finite. No partial result is
/// produced on either failure.
pub fn predict(
    handle: &ModelHandle,
    features: &FeatureVector,
) -> Result<PredictionResult, CropError> {
    let model = handle.get()?;

    if let Some(field) = features.first_non_finite() {
        return Err(CropError::InvalidFeature(format!(
            "feature '{}' is not a finite number",
            field
        )));
    }

    let (winner, votes) = model.predict_votes(features);
    let crop = model.labels()[winner].clone();
    let confidence = votes as f64 / model.num_trees() as f64 * 100.0;

    Ok(PredictionResult {
        description: format!("Based on your soil, {} is the optimal crop.", crop),
        crop,
        confidence,
    })
}
