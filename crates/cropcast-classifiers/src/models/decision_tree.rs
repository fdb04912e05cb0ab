//! Single CART decision tree: the random-forest base learner.
//!
//! Splits minimize gini impurity over midpoint thresholds, considering a
//! random subset of feature dimensions at each split so that trees in the
//! ensemble decorrelate.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::features::NUM_FEATURES;

/// Hyper-parameters threaded down from `ForestConfig`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted decision tree over class indices `0..n_classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Fit a tree on the rows of `x`/`y` selected by `indices`.
    ///
    /// `indices` may repeat rows (bootstrap sampling). Deterministic for a
    /// given RNG state.
    pub(crate) fn fit(
        x: &[[f64; NUM_FEATURES]],
        y: &[usize],
        n_classes: usize,
        indices: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let root = build_node(x, y, n_classes, indices, 0, params, rng);
        DecisionTree { root }
    }

    /// Class vote for one feature vector.
    pub(crate) fn predict(&self, features: &[f64; NUM_FEATURES]) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

/// Majority class; ties resolve to the lowest class index.
fn majority_class(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mut sum_sq = 0.0;
    for &count in counts {
        let p = count as f64 / total as f64;
        sum_sq += p * p;
    }
    1.0 - sum_sq
}

fn build_node(
    x: &[[f64; NUM_FEATURES]],
    y: &[usize],
    n_classes: usize,
    indices: &[usize],
    depth: usize,
    params: &TreeParams,
    rng: &mut StdRng,
) -> Node {
    let counts = class_counts(y, indices, n_classes);
    let majority = majority_class(&counts);

    let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if is_pure || depth >= params.max_depth || indices.len() < params.min_samples_split {
        return Node::Leaf { class: majority };
    }

    match best_split(x, y, n_classes, indices, &counts, params, rng) {
        Some((feature, threshold)) => {
            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| x[i][feature] <= threshold);
            if left_idx.is_empty() || right_idx.is_empty() {
                return Node::Leaf { class: majority };
            }
            Node::Split {
                feature,
                threshold,
                left: Box::new(build_node(
                    x, y, n_classes, &left_idx, depth + 1, params, rng,
                )),
                right: Box::new(build_node(
                    x, y, n_classes, &right_idx, depth + 1, params, rng,
                )),
            }
        }
        None => Node::Leaf { class: majority },
    }
}

/// Best (feature, threshold) over a random feature subset, or `None` when
/// no candidate improves on the parent impurity.
fn best_split(
    x: &[[f64; NUM_FEATURES]],
    y: &[usize],
    n_classes: usize,
    indices: &[usize],
    parent_counts: &[usize],
    params: &TreeParams,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let mut candidates: Vec<usize> = (0..NUM_FEATURES).collect();
    candidates.shuffle(rng);
    candidates.truncate(params.max_features);

    let n = indices.len();
    let parent_gini = gini(parent_counts, n);

    let mut best: Option<(usize, f64, f64)> = None;
    for &feature in &candidates {
        let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let mut left_counts = vec![0usize; n_classes];
            let mut right_counts = vec![0usize; n_classes];
            for &i in indices {
                if x[i][feature] <= threshold {
                    left_counts[y[i]] += 1;
                } else {
                    right_counts[y[i]] += 1;
                }
            }
            let n_left: usize = left_counts.iter().sum();
            let n_right = n - n_left;

            let impurity = (n_left as f64 * gini(&left_counts, n_left)
                + n_right as f64 * gini(&right_counts, n_right))
                / n as f64;

            if best.map_or(true, |(_, _, current)| impurity < current) {
                best = Some((feature, threshold, impurity));
            }
        }
    }

    best.filter(|&(_, _, impurity)| impurity < parent_gini - 1e-12)
        .map(|(feature, threshold, _)| (feature, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn row(n: f64, rainfall: f64) -> [f64; NUM_FEATURES] {
        [n, 40.0, 40.0, 25.0, 70.0, 6.5, rainfall]
    }

    #[test]
    fn test_tree_separates_two_classes() {
        let x = vec![
            row(10.0, 50.0),
            row(12.0, 55.0),
            row(11.0, 52.0),
            row(90.0, 200.0),
            row(92.0, 210.0),
            row(88.0, 205.0),
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..x.len()).collect();
        let params = TreeParams {
            max_depth: 8,
            min_samples_split: 2,
            max_features: NUM_FEATURES,
        };

        let mut rng = StdRng::seed_from_u64(7);
        let tree = DecisionTree::fit(&x, &y, 2, &indices, &params, &mut rng);

        for (features, &label) in x.iter().zip(&y) {
            assert_eq!(tree.predict(features), label);
        }
    }

    #[test]
    fn test_pure_node_becomes_leaf() {
        let x = vec![row(10.0, 50.0), row(90.0, 200.0)];
        let y = vec![1, 1];
        let indices = vec![0, 1];
        let params = TreeParams {
            max_depth: 8,
            min_samples_split: 2,
            max_features: 2,
        };

        let mut rng = StdRng::seed_from_u64(7);
        let tree = DecisionTree::fit(&x, &y, 2, &indices, &params, &mut rng);

        assert_eq!(tree.predict(&row(50.0, 100.0)), 1);
    }

    #[test]
    fn test_majority_tie_breaks_to_lowest_class() {
        assert_eq!(majority_class(&[3, 3]), 0);
        assert_eq!(majority_class(&[0, 2, 2]), 1);
    }

    #[test]
    fn test_gini_bounds() {
        assert_eq!(gini(&[4, 0], 4), 0.0);
        assert!((gini(&[2, 2], 4) - 0.5).abs() < 1e-12);
    }
}
