use serde::{Deserialize, Serialize};

use crate::features::NUM_FEATURES;

/// Central hyper-parameter configuration for the forest trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub num_trees: usize,
    /// Maximum depth of each tree.
    pub max_depth: usize,
    /// Minimum number of samples required to attempt a split.
    pub min_samples_split: usize,
    /// Features considered per split; `None` uses floor(sqrt(7)) = 2.
    pub max_features: Option<usize>,
    /// Seed driving bootstrap sampling and per-split feature subsets.
    pub seed: u64,
}

impl ForestConfig {
    /// Effective per-split feature count, clamped to the schema width.
    pub fn resolved_max_features(&self) -> usize {
        self.max_features
            .unwrap_or_else(|| (NUM_FEATURES as f64).sqrt() as usize)
            .clamp(1, NUM_FEATURES)
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            num_trees: 100,
            max_depth: 16,
            min_samples_split: 2,
            max_features: None,
            seed: 42,
        }
    }
}
