//! Integration tests for the forest trainer: determinism, label-set
//! closure, and config serialization.

use cropcast_classifiers::config::ForestConfig;
use cropcast_classifiers::features::{Dataset, FeatureVector, LabeledSample};
use cropcast_classifiers::models::forest::ClassifierModel;

fn sample(label: &str, nitrogen: f64, rainfall: f64) -> LabeledSample {
    LabeledSample {
        features: FeatureVector {
            nitrogen,
            phosphorus: 40.0,
            potassium: 40.0,
            temperature: 25.0,
            humidity: 70.0,
            ph: 6.5,
            rainfall,
        },
        label: label.to_string(),
    }
}

fn two_crop_dataset() -> Dataset {
    let mut samples = Vec::new();
    for i in 0..10 {
        samples.push(sample("rice", 88.0 + i as f64, 195.0 + i as f64));
        samples.push(sample("maize", 38.0 + i as f64, 75.0 + i as f64));
    }
    Dataset::new(samples)
}

fn small_config(seed: u64) -> ForestConfig {
    ForestConfig {
        num_trees: 25,
        seed,
        ..ForestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_predictions() {
    let train = two_crop_dataset();
    let model_a = ClassifierModel::fit(&train, &small_config(7)).unwrap();
    let model_b = ClassifierModel::fit(&train, &small_config(7)).unwrap();

    for sample in &train.samples {
        assert_eq!(
            model_a.predict_votes(&sample.features),
            model_b.predict_votes(&sample.features)
        );
    }
}

// ---------------------------------------------------------------------------
// Label-set closure
// ---------------------------------------------------------------------------

#[test]
fn predictions_stay_within_training_labels() {
    let train = two_crop_dataset();
    let model = ClassifierModel::fit(&train, &small_config(11)).unwrap();
    assert_eq!(model.labels(), ["maize".to_string(), "rice".to_string()]);

    // probe well outside the training clusters
    let probes = [
        sample("?", -500.0, 0.0).features,
        sample("?", 500.0, 1000.0).features,
        sample("?", 60.0, 130.0).features,
    ];
    for features in &probes {
        let crop = model.predict_label(features);
        assert!(crop == "rice" || crop == "maize", "unexpected label {}", crop);
    }
}

#[test]
fn model_fits_separable_training_data() {
    let train = two_crop_dataset();
    let model = ClassifierModel::fit(&train, &small_config(5)).unwrap();
    for sample in &train.samples {
        assert_eq!(model.predict_label(&sample.features), sample.label);
    }
}

// ---------------------------------------------------------------------------
// ForestConfig defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn forest_config_default_values() {
    let cfg = ForestConfig::default();
    assert_eq!(cfg.num_trees, 100);
    assert!(cfg.max_depth > 0);
    assert!(cfg.min_samples_split >= 2);
    assert_eq!(cfg.resolved_max_features(), 2);
}

#[test]
fn forest_config_round_trips_json() {
    let cfg = ForestConfig {
        num_trees: 31,
        max_features: Some(3),
        seed: 9,
        ..ForestConfig::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: ForestConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg2.num_trees, 31);
    assert_eq!(cfg2.resolved_max_features(), 3);
    assert_eq!(cfg2.seed, 9);
}

#[test]
fn forest_config_partial_json_uses_defaults() {
    let cfg: ForestConfig = serde_json::from_str(r#"{"num_trees": 10}"#).unwrap();
    assert_eq!(cfg.num_trees, 10);
    assert_eq!(cfg.seed, ForestConfig::default().seed);
}
