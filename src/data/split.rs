//! Label-stratified train/held-out split
//!
//! Each class is shuffled independently with a seeded ChaCha generator and
//! `round(n_class * test_ratio)` of its rows are held out, so both partitions
//! keep the class ratio of the full dataset. ChaCha output is fixed across
//! platforms and releases, which keeps a given seed reproducible.

use crate::core::{Dataset, Label, PipelineError, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Row indices of the two partitions, each in ascending dataset order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub held_out: Vec<usize>,
}

/// Split `dataset` into training and held-out row indices
pub fn stratified_split<D: Dataset>(
    dataset: &D,
    test_ratio: f64,
    seed: u64,
) -> Result<SplitIndices> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(PipelineError::InvalidParameter(format!(
            "test ratio must be in [0, 1), got {test_ratio}"
        )));
    }

    let mut negatives = Vec::new();
    let mut positives = Vec::new();
    for (i, label) in dataset.get_labels().into_iter().enumerate() {
        match label {
            Label::Negative => negatives.push(i),
            Label::Positive => positives.push(i),
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    negatives.shuffle(&mut rng);
    positives.shuffle(&mut rng);

    let held_neg = (negatives.len() as f64 * test_ratio).round() as usize;
    let held_pos = (positives.len() as f64 * test_ratio).round() as usize;

    let mut held_out: Vec<usize> = negatives[..held_neg]
        .iter()
        .chain(&positives[..held_pos])
        .copied()
        .collect();
    let mut train: Vec<usize> = negatives[held_neg..]
        .iter()
        .chain(&positives[held_pos..])
        .copied()
        .collect();
    held_out.sort_unstable();
    train.sort_unstable();

    debug!(
        "Stratified split (seed {seed}): train={} ({}+{}) held-out={} ({}+{})",
        train.len(),
        negatives.len() - held_neg,
        positives.len() - held_pos,
        held_out.len(),
        held_neg,
        held_pos
    );

    Ok(SplitIndices { train, held_out })
}
