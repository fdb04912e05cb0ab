//! Inference path: restore the model artifact and answer one request.
use std::path::Path;

use anyhow::Result;

use cropcast_classifiers::error::CropError;
use cropcast_classifiers::predictor::{predict, CropRequest, ModelHandle, PredictionResult};
use cropcast_classifiers::store::load_model;

/// Parse a JSON feature object into a request.
///
/// Malformed JSON, missing keys, and non-numeric values are all a client
/// fault, surfaced as `InvalidFeature`.
pub fn parse_request(json: &str) -> Result<CropRequest, CropError> {
    serde_json::from_str(json).map_err(|e| CropError::InvalidFeature(e.to_string()))
}

/// Restore the artifact at `model_path` and predict for `request_json`.
pub fn run_prediction<P: AsRef<Path>>(
    model_path: P,
    request_json: &str,
) -> Result<PredictionResult> {
    let handle = ModelHandle::empty();
    let model = load_model(&model_path)?;
    handle.install(model)?;

    let request = parse_request(request_json)?;
    let result = predict(&handle, &request.into())?;
    Ok(result)
}
