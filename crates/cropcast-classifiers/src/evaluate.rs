//! Model evaluation against a held-out dataset.
use crate::features::Dataset;
use crate::models::forest::ClassifierModel;

/// Fraction of samples in `test` whose predicted label matches the true
/// label, in [0, 1]. Uses the same majority-vote procedure as serving.
///
/// An empty dataset evaluates to 0.0. Whether an accuracy is acceptable
/// is the caller's policy; nothing is enforced here.
pub fn accuracy(model: &ClassifierModel, test: &Dataset) -> f64 {
    if test.is_empty() {
        return 0.0;
    }
    let correct = test
        .samples
        .iter()
        .filter(|sample| model.predict_label(&sample.features) == sample.label)
        .count();
    correct as f64 / test.len() as f64
}
