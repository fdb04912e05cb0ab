//! End-to-end smoke test: split, fit, evaluate, persist, predict.

use cropcast_classifiers::config::ForestConfig;
use cropcast_classifiers::evaluate::accuracy;
use cropcast_classifiers::features::{Dataset, FeatureVector, LabeledSample};
use cropcast_classifiers::models::forest::ClassifierModel;
use cropcast_classifiers::predictor::{predict, ModelHandle};
use cropcast_classifiers::split::split;
use cropcast_classifiers::store::{load_model, save_model};

fn sample(label: &str, nitrogen: f64, rainfall: f64, jitter: f64) -> LabeledSample {
    LabeledSample {
        features: FeatureVector {
            nitrogen: nitrogen + jitter,
            phosphorus: 40.0 + jitter,
            potassium: 40.0,
            temperature: 25.0,
            humidity: 70.0,
            ph: 6.5,
            rainfall: rainfall + jitter,
        },
        label: label.to_string(),
    }
}

/// Three near-linearly-separable crops, 10 samples each. Rice sits at
/// high nitrogen and high rainfall.
fn synthetic_dataset() -> Dataset {
    let mut samples = Vec::new();
    for i in 0..10 {
        let jitter = i as f64;
        samples.push(sample("rice", 88.0, 195.0, jitter));
        samples.push(sample("maize", 38.0, 75.0, jitter));
        samples.push(sample("cotton", 118.0, 55.0, jitter));
    }
    Dataset::new(samples)
}

#[test]
fn training_pipeline_reaches_smoke_accuracy() {
    let dataset = synthetic_dataset();
    let (train, test) = split(&dataset, 0.2, 42).unwrap();
    assert_eq!(train.len(), 24);
    assert_eq!(test.len(), 6);

    let config = ForestConfig {
        num_trees: 50,
        seed: 42,
        ..ForestConfig::default()
    };
    let model = ClassifierModel::fit(&train, &config).unwrap();

    let acc = accuracy(&model, &test);
    assert!(acc >= 0.8, "held-out accuracy {} below smoke threshold", acc);
}

#[test]
fn saved_model_serves_predictions() {
    let dataset = synthetic_dataset();
    let (train, _test) = split(&dataset, 0.2, 42).unwrap();
    let config = ForestConfig {
        num_trees: 50,
        seed: 42,
        ..ForestConfig::default()
    };
    let model = ClassifierModel::fit(&train, &config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crop_model.json");
    save_model(&model, &path).unwrap();

    let handle = ModelHandle::empty();
    handle.install(load_model(&path).unwrap()).unwrap();

    let result = predict(&handle, &sample("?", 90.0, 200.0, 0.0).features).unwrap();
    assert_eq!(result.crop, "rice");
    assert!(result.confidence > 50.0);
    assert!(result.description.contains("rice"));
}

#[test]
fn evaluate_on_empty_test_set_is_zero() {
    let dataset = synthetic_dataset();
    let config = ForestConfig {
        num_trees: 5,
        seed: 1,
        ..ForestConfig::default()
    };
    let model = ClassifierModel::fit(&dataset, &config).unwrap();
    assert_eq!(accuracy(&model, &Dataset::default()), 0.0);
}
