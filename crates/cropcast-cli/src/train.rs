//! Training pipeline: dataset load, stratified split, forest fit,
//! held-out evaluation, model artifact.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cropcast_classifiers::config::ForestConfig;
use cropcast_classifiers::evaluate::accuracy;
use cropcast_classifiers::io::read_crop_csv;
use cropcast_classifiers::models::forest::ClassifierModel;
use cropcast_classifiers::split::split;
use cropcast_classifiers::store::save_model;

/// Parameters for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub forest: ForestConfig,
    /// Fraction of each label group held out for evaluation.
    pub test_fraction: f64,
    /// Where the fitted model artifact is written.
    pub output_file: PathBuf,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            test_fraction: 0.2,
            output_file: PathBuf::from("crop_model.json"),
        }
    }
}

/// Load a training configuration from a JSON file.
pub fn load_train_config<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: TrainConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Run the full training pipeline and return the held-out accuracy.
///
/// Any training-time failure aborts the run; no partial model artifact
/// is written.
pub fn run_training<P: AsRef<Path>>(data_path: P, config: &TrainConfig) -> Result<f64> {
    let dataset = read_crop_csv(&data_path)?;
    for (label, count) in dataset.label_counts() {
        log::debug!("  {}: {} samples", label, count);
    }

    let (train, test) = split(&dataset, config.test_fraction, config.forest.seed)?;
    log::info!(
        "Split {} samples into {} train / {} test",
        dataset.len(),
        train.len(),
        test.len()
    );

    let start_time = std::time::Instant::now();
    let model = ClassifierModel::fit(&train, &config.forest)?;
    log::info!("Training completed in {:?}", start_time.elapsed());

    let acc = accuracy(&model, &test);
    log::info!("Held-out accuracy: {:.2}%", acc * 100.0);

    save_model(&model, &config.output_file)?;
    log::info!("Model saved to: {}", config.output_file.display());

    Ok(acc)
}
