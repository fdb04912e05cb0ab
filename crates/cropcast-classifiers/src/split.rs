//! Stratified train/test splitting.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::CropError;
use crate::features::Dataset;

/// Partition `dataset` into stratified train/test subsets.
///
/// Samples are grouped by label; each group is shuffled with the seeded
/// RNG and cut at `floor(group_size * (1 - test_fraction))`. Both subsets
/// therefore keep every label's share close to the source distribution,
/// which a single global shuffle does not guarantee for rare labels.
/// Pure function of its inputs: the same dataset, fraction, and seed
/// always produce the same partition.
///
/// # Arguments
///
/// * `dataset` - The labeled samples to partition.
/// * `test_fraction` - Held-out share per label group, in (0, 1).
/// * `seed` - RNG seed for the per-group shuffles.
///
/// # Returns
///
/// `(train, test)` datasets covering the input disjointly.
pub fn split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), CropError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(CropError::Config(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, sample) in dataset.samples.iter().enumerate() {
        groups.entry(sample.label.as_str()).or_default().push(i);
    }

    if groups.len() < 2 {
        return Err(CropError::InsufficientData(format!(
            "need at least 2 distinct labels, found {}",
            groups.len()
        )));
    }
    for (label, indices) in &groups {
        // a single-member class cannot appear in both partitions
        if indices.len() < 2 {
            return Err(CropError::InsufficientData(format!(
                "label '{}' has {} sample(s); at least 2 are required",
                label,
                indices.len()
            )));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    // Groups are visited in sorted label order so the single RNG stream
    // is reproducible across runs.
    for (_label, mut indices) in groups {
        indices.shuffle(&mut rng);
        let cut = (indices.len() as f64 * (1.0 - test_fraction)).floor() as usize;
        for &i in &indices[..cut] {
            train.push(dataset.samples[i].clone());
        }
        for &i in &indices[cut..] {
            test.push(dataset.samples[i].clone());
        }
    }

    log::debug!(
        "Stratified split: {} train / {} test samples",
        train.len(),
        test.len()
    );

    Ok((Dataset::new(train), Dataset::new(test)))
}
