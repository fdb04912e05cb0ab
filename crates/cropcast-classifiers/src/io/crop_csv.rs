//! Crop recommendation CSV reader.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::features::{Dataset, FeatureVector, LabeledSample, FEATURE_NAMES, NUM_FEATURES};

/// Configuration for reading crop recommendation CSV files.
#[derive(Debug, Clone)]
pub struct CropCsvConfig {
    /// Column name holding the crop label.
    pub label_column: String,
    /// Feature column names, in the canonical order.
    pub feature_columns: [String; NUM_FEATURES],
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for CropCsvConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            feature_columns: FEATURE_NAMES.map(|name| name.to_string()),
            delimiter: b',',
        }
    }
}

/// Read a labeled crop CSV into a `Dataset`.
pub fn read_crop_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_crop_csv_with_config(path, &CropCsvConfig::default())
}

/// Read a labeled crop CSV using a custom configuration.
///
/// Column headers are resolved case-insensitively. Rows with an empty
/// label or an empty feature cell are skipped with a warning; a
/// non-numeric feature cell is an error.
pub fn read_crop_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &CropCsvConfig,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;

    let mut feature_indices = [0usize; NUM_FEATURES];
    for (slot, name) in feature_indices.iter_mut().zip(&config.feature_columns) {
        *slot = find_column(&headers, name)
            .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
    }

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let label = record.get(label_idx).unwrap_or("").trim();
        if label.is_empty() {
            skipped += 1;
            continue;
        }

        let mut values = [0f64; NUM_FEATURES];
        let mut missing = false;
        for (value, &idx) in values.iter_mut().zip(&feature_indices) {
            let raw = record.get(idx).unwrap_or("").trim();
            if raw.is_empty() {
                missing = true;
                break;
            }
            *value = raw.parse::<f64>().with_context(|| {
                format!(
                    "Invalid feature '{}' value '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    raw,
                    row_idx + 1
                )
            })?;
        }
        if missing {
            skipped += 1;
            continue;
        }

        let features = FeatureVector::try_from_slice(&values)
            .map_err(|e| anyhow!("Row {}: {}", row_idx + 1, e))?;
        samples.push(LabeledSample {
            features,
            label: label.to_string(),
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with missing values", skipped);
    }
    if samples.is_empty() {
        return Err(anyhow!("No usable rows in {}", path.as_ref().display()));
    }
    log::info!("Dataset loaded: {} records", samples.len());

    Ok(Dataset::new(samples))
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}
