//! Indexed trial containers.
//!
//! [`TrialSet`] pairs a [N, C, T] tensor with its N labels and serves one trial
//! per index.  [`EegDataset`] is the built dataset: a training `TrialSet`, the
//! held-out validation `TrialSet` and the configuration that produced them.
//! Both are immutable once built and can be shared across loader workers by
//! reference.
use anyhow::Result;
use ndarray::{s, Array1, Array2, Array3, Axis};
use std::path::Path;

use crate::config::{DatasetOptions, PreprocessConfig};
use crate::error::DatasetError;

/// Random-access view of a dataset, as consumed by a batching loader.
pub trait Dataset {
    type Item;

    /// Number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `index`; `IndexOutOfRange` if `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item, DatasetError>;
}

/// One trial and its class index.
#[derive(Debug, Clone, PartialEq)]
pub struct EegSample {
    /// [C, T]
    pub data: Array2<f32>,
    pub label: i64,
}

/// Several trials gathered by index, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct EegBatch {
    /// [B, C, T]
    pub data: Array3<f32>,
    /// [B]
    pub labels: Array1<i64>,
}

// ── TrialSet ──────────────────────────────────────────────────────────────────

/// A trial tensor and its label vector, same length along the trial axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSet {
    data: Array3<f32>,
    labels: Array1<i64>,
}

impl TrialSet {
    pub fn new(data: Array3<f32>, labels: Array1<i64>) -> Result<Self, DatasetError> {
        let trials = data.len_of(Axis(0));
        if trials != labels.len() {
            return Err(DatasetError::LabelCountMismatch { trials, labels: labels.len() });
        }
        Ok(Self { data, labels })
    }

    /// [N, C, T]
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn labels(&self) -> &Array1<i64> {
        &self.labels
    }

    pub fn n_channels(&self) -> usize {
        self.data.dim().1
    }

    pub fn n_times(&self) -> usize {
        self.data.dim().2
    }

    fn check_index(&self, index: usize) -> Result<(), DatasetError> {
        let len = self.len();
        if index >= len {
            return Err(DatasetError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Gather the trials at `indices` into one batch.  Fails as a whole if any
    /// index is out of range.
    pub fn get_batch(&self, indices: &[usize]) -> Result<EegBatch, DatasetError> {
        for &i in indices {
            self.check_index(i)?;
        }
        Ok(EegBatch {
            data: self.data.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        })
    }

    /// Samples in index order.
    pub fn iter(&self) -> impl Iterator<Item = EegSample> + '_ {
        self.data
            .outer_iter()
            .zip(self.labels.iter())
            .map(|(trial, &label)| EegSample { data: trial.to_owned(), label })
    }
}

impl Dataset for TrialSet {
    type Item = EegSample;

    fn len(&self) -> usize {
        let n = self.data.len_of(Axis(0));
        assert_eq!(n, self.labels.len(), "trial count and label count diverged");
        n
    }

    fn get(&self, index: usize) -> Result<EegSample, DatasetError> {
        self.check_index(index)?;
        Ok(EegSample {
            data: self.data.slice(s![index, .., ..]).to_owned(),
            label: self.labels[index],
        })
    }
}

// ── EegDataset ────────────────────────────────────────────────────────────────

/// A preprocessed EEG dataset.
///
/// Indexing (`len`, `get`, `get_batch`, `iter`) addresses the training
/// partition; the held-out trials are reachable through
/// [`EegDataset::validation`].
///
/// ```no_run
/// use eegdata::{Dataset, DatasetOptions, EegDataset, PreprocessConfig};
/// use std::path::Path;
///
/// let cfg = PreprocessConfig { subsample: 2, mov_avg: 5, trim: 10 };
/// let ds = EegDataset::load(
///     Path::new("X_train.npy"),
///     Path::new("y_train.npy"),
///     cfg,
///     DatasetOptions::default(),
/// ).unwrap();
///
/// let sample = ds.get(0).unwrap();
/// println!("{:?} → class {}", sample.data.dim(), sample.label);
/// ```
#[derive(Debug, Clone)]
pub struct EegDataset {
    train: TrialSet,
    validation: TrialSet,
    config: PreprocessConfig,
    options: DatasetOptions,
}

impl EegDataset {
    /// Load both `.npy` files and run the full pipeline.
    ///
    /// The raw labels are shifted by [`crate::io::LABEL_OFFSET`] before
    /// anything else happens.
    pub fn load(
        data_path: &Path,
        label_path: &Path,
        config: PreprocessConfig,
        options: DatasetOptions,
    ) -> Result<Self> {
        let data = crate::io::load_trials(data_path)?;
        let labels = crate::io::load_labels(label_path)?;
        crate::preprocess(data, labels, config, options)
    }

    pub(crate) fn from_parts(
        train: TrialSet,
        validation: TrialSet,
        config: PreprocessConfig,
        options: DatasetOptions,
    ) -> Self {
        Self { train, validation, config, options }
    }

    /// Training partition.
    pub fn train(&self) -> &TrialSet {
        &self.train
    }

    /// Held-out partition (empty when `validation_size` rounds to zero trials).
    pub fn validation(&self) -> &TrialSet {
        &self.validation
    }

    /// Preprocessing that was applied.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    pub fn options(&self) -> &DatasetOptions {
        &self.options
    }

    /// Training tensor, [N, C, T].
    pub fn data(&self) -> &Array3<f32> {
        self.train.data()
    }

    /// Training labels, [N].
    pub fn labels(&self) -> &Array1<i64> {
        self.train.labels()
    }

    pub fn n_channels(&self) -> usize {
        self.train.n_channels()
    }

    pub fn n_times(&self) -> usize {
        self.train.n_times()
    }

    pub fn get_batch(&self, indices: &[usize]) -> Result<EegBatch, DatasetError> {
        self.train.get_batch(indices)
    }

    pub fn iter(&self) -> impl Iterator<Item = EegSample> + '_ {
        self.train.iter()
    }
}

impl Dataset for EegDataset {
    type Item = EegSample;

    fn len(&self) -> usize {
        self.train.len()
    }

    fn get(&self, index: usize) -> Result<EegSample, DatasetError> {
        self.train.get(index)
    }
}
