//! Bagged decision-tree ensemble (random forest) classifier.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ForestConfig;
use crate::error::CropError;
use crate::features::{Dataset, FeatureVector, NUM_FEATURES};
use crate::models::decision_tree::{DecisionTree, TreeParams};

/// A fitted ensemble over the fixed label set observed at training time.
///
/// Immutable after `fit`; predictions can only be labels from that set.
/// Serializable for the save/restore round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    labels: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl ClassifierModel {
    /// Fit a bagged ensemble on `train`.
    ///
    /// Each tree is trained on a bootstrap sample (with replacement, same
    /// size as `train`) and considers a random feature subset at every
    /// split. Every tree derives its RNG from `(config.seed, tree index)`,
    /// so the result is reproducible and the per-tree fits can run in
    /// parallel without an ordering requirement.
    ///
    /// # Errors
    ///
    /// `Config` when `num_trees` is 0; `Schema` when the dataset is empty
    /// or any sample carries a non-finite feature value.
    pub fn fit(train: &Dataset, config: &ForestConfig) -> Result<Self, CropError> {
        if config.num_trees == 0 {
            return Err(CropError::Config("num_trees must be at least 1".to_string()));
        }
        if train.is_empty() {
            return Err(CropError::Schema("training dataset is empty".to_string()));
        }
        for (row, sample) in train.samples.iter().enumerate() {
            if let Some(field) = sample.features.first_non_finite() {
                return Err(CropError::Schema(format!(
                    "row {}: feature '{}' is not a finite number",
                    row, field
                )));
            }
        }

        let labels = train.labels();
        let n_classes = labels.len();
        let x: Vec<[f64; NUM_FEATURES]> = train
            .samples
            .iter()
            .map(|sample| sample.features.as_array())
            .collect();
        // labels is sorted, so the lookup cannot miss
        let y: Vec<usize> = train
            .samples
            .iter()
            .map(|sample| labels.binary_search(&sample.label).unwrap_or(0))
            .collect();

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features: config.resolved_max_features(),
        };

        let n = x.len();
        let trees: Vec<DecisionTree> = (0..config.num_trees)
            .into_par_iter()
            .map(|t| {
                // per-tree stream derived from the run seed
                let mut rng =
                    StdRng::seed_from_u64(config.seed ^ (t as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(&x, &y, n_classes, &bootstrap, &params, &mut rng)
            })
            .collect();

        log::info!(
            "Fitted {} trees on {} samples across {} crop labels",
            trees.len(),
            n,
            n_classes
        );

        Ok(ClassifierModel { labels, trees })
    }

    /// The sorted label set fixed at training time.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Majority vote over all trees.
    ///
    /// Ties break toward the lowest label index, i.e. the lexicographically
    /// smallest crop name, so repeated calls always agree.
    ///
    /// # Returns
    ///
    /// `(winning label index, votes for that label)`.
    pub fn predict_votes(&self, features: &FeatureVector) -> (usize, usize) {
        let array = features.as_array();
        let mut votes = vec![0usize; self.labels.len()];
        for tree in &self.trees {
            votes[tree.predict(&array)] += 1;
        }
        let mut winner = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[winner] {
                winner = class;
            }
        }
        (winner, votes[winner])
    }

    /// Predicted crop label for one feature vector.
    pub fn predict_label(&self, features: &FeatureVector) -> &str {
        let (winner, _) = self.predict_votes(features);
        &self.labels[winner]
    }
}
