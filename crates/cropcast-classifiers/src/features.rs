//! Core data types for the crop recommendation pipeline.
//!
//! Defines the fixed 7-field `FeatureVector`, labeled samples, and the
//! `Dataset` container with the label bookkeeping used by the splitter
//! and trainer.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Number of fields in the canonical feature schema.
pub const NUM_FEATURES: usize = 7;

/// Canonical feature column order. The model is fit on exactly this order
/// and every serving-time vector must reproduce it.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// One soil/climate measurement record in the canonical field order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    /// Field values in the canonical column order.
    pub fn as_array(&self) -> [f64; NUM_FEATURES] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Build a vector from a slice in the canonical column order.
    ///
    /// # Errors
    ///
    /// `InvalidFeature` when the slice does not hold exactly 7 finite
    /// values. Wrong arity is never truncated or padded.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, CropError> {
        if values.len() != NUM_FEATURES {
            return Err(CropError::InvalidFeature(format!(
                "expected {} feature values, got {}",
                NUM_FEATURES,
                values.len()
            )));
        }
        let vector = FeatureVector {
            nitrogen: values[0],
            phosphorus: values[1],
            potassium: values[2],
            temperature: values[3],
            humidity: values[4],
            ph: values[5],
            rainfall: values[6],
        };
        if let Some(field) = vector.first_non_finite() {
            return Err(CropError::InvalidFeature(format!(
                "feature '{}' is not a finite number",
                field
            )));
        }
        Ok(vector)
    }

    /// Name of the first non-finite field, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        FEATURE_NAMES
            .iter()
            .zip(self.as_array())
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| *name)
    }
}

/// A feature vector paired with its observed crop label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub label: String,
}

/// An ordered collection of labeled samples; immutable during a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub samples: Vec<LabeledSample>,
}

impl Dataset {
    pub fn new(samples: Vec<LabeledSample>) -> Self {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample count per label, keyed in sorted label order.
    pub fn label_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Sorted, deduplicated labels observed in this dataset.
    pub fn labels(&self) -> Vec<String> {
        self.label_counts()
            .keys()
            .map(|label| label.to_string())
            .collect()
    }
}
