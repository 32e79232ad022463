//! Shuffled train / validation split.
//!
//! Trials are permuted with a Fisher–Yates shuffle, the first
//! `floor(N × validation_size)` entries of the permutation form the validation
//! set and the rest, in permuted order, form the training set.
use ndarray::{Array1, Array3, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::DatasetError;

/// Result of [`shuffle_split`].
#[derive(Debug, Clone)]
pub struct Split<L> {
    pub train_data: Array3<f32>,
    pub train_labels: Array1<L>,
    pub val_data: Array3<f32>,
    pub val_labels: Array1<L>,
}

/// Number of trials held out for validation.
pub fn validation_count(n_trials: usize, validation_size: f64) -> Result<usize, DatasetError> {
    if !(0.0..1.0).contains(&validation_size) {
        return Err(DatasetError::InvalidValidationSize(validation_size));
    }
    Ok((n_trials as f64 * validation_size) as usize)
}

/// RNG for the split: seeded when `seed` is given, OS entropy otherwise.
pub fn split_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Shuffle trials and split off a validation fraction.
pub fn shuffle_split<L: Clone, R: Rng + ?Sized>(
    data: &Array3<f32>,
    labels: &Array1<L>,
    validation_size: f64,
    rng: &mut R,
) -> Result<Split<L>, DatasetError> {
    let n_trials = data.len_of(Axis(0));
    if labels.len() != n_trials {
        return Err(DatasetError::LabelCountMismatch { trials: n_trials, labels: labels.len() });
    }
    let n_val = validation_count(n_trials, validation_size)?;

    let mut order: Vec<usize> = (0..n_trials).collect();
    order.shuffle(rng);
    let (val_idx, train_idx) = order.split_at(n_val);

    Ok(Split {
        train_data: data.select(Axis(0), train_idx),
        train_labels: labels.select(Axis(0), train_idx),
        val_data: data.select(Axis(0), val_idx),
        val_labels: labels.select(Axis(0), val_idx),
    })
}
