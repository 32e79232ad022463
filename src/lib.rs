//! # eegdata — EEG trial datasets for training loops
//!
//! `eegdata` loads epoched EEG trials and their class labels from NumPy
//! `.npy` files, runs a fixed preprocessing pipeline and serves the result one
//! trial at a time (or one batch at a time) to a training loop.
//!
//! ## Pipeline overview
//!
//! ```text
//! X.npy [N, C, T] f32/f64          y.npy [N] event codes
//!   │                                │
//!   │                                └─ io::load_labels        y − 769 → class index
//!   ├─ trim::trim_time                  drop last `trim` samples      → [N, C, T − trim]
//!   ├─ subsample::subsample_expand      s phase copies per trial      → [N·s, C, (T − trim) / s]
//!   ├─ split::shuffle_split             seeded shuffle, hold out ⌊N·s·v⌋ trials
//!   ├─ smooth::moving_average_time      box filter, width w (train)   → [·, C, (T − trim) / s − w + 1]
//!   │
//!   └─→ EegDataset { train: TrialSet, validation: TrialSet, config }
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use eegdata::{Dataset, DatasetOptions, EegDataset, PreprocessConfig};
//! use std::path::Path;
//!
//! let cfg  = PreprocessConfig { subsample: 2, mov_avg: 5, trim: 500 };
//! let opts = DatasetOptions { seed: Some(0), ..DatasetOptions::default() };
//! let ds   = EegDataset::load(Path::new("X_train_valid.npy"), Path::new("y_train_valid.npy"), cfg, opts).unwrap();
//!
//! for i in 0..ds.len() {
//!     let sample = ds.get(i).unwrap();   // data: [C, T'], label: i64
//!     let _ = sample;
//! }
//! let val = ds.validation();
//! println!("{} train / {} validation trials", ds.len(), val.len());
//! ```
//!
//! ## Running individual steps
//!
//! ```
//! use eegdata::{smooth::moving_average_time, subsample::subsample_expand, trim::trim_time};
//! use ndarray::{Array1, Array3};
//!
//! let data   = Array3::<f32>::zeros((100, 4, 200));
//! let labels = Array1::<i64>::zeros(100);
//!
//! let data = trim_time(&data, 10).unwrap();                        // [100, 4, 190]
//! let (data, labels) = subsample_expand(&data, &labels, 2).unwrap(); // [200, 4, 95]
//! let data = moving_average_time(&data, 5).unwrap();               // [200, 4, 91]
//! assert_eq!(data.dim(), (200, 4, 91));
//! assert_eq!(labels.len(), 200);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod smooth;
pub mod split;
pub mod subsample;
pub mod trim;

use anyhow::Result;
use ndarray::{Array1, Array3, Axis};

// ── Crate-root re-exports ─────────────────────────────────────────────────

pub use config::{DatasetOptions, PreprocessConfig};
pub use dataset::{Dataset, EegBatch, EegDataset, EegSample, TrialSet};
pub use error::DatasetError;
pub use io::{load_labels, load_trials, normalize_labels, write_dataset, StWriter, LABEL_OFFSET};
pub use smooth::{moving_average, moving_average_time};
pub use split::{shuffle_split, split_rng, validation_count, Split};
pub use subsample::subsample_expand;
pub use trim::trim_time;

/// Run the **full preprocessing pipeline** on in-memory trials.
///
/// `labels` must already be class indices (see [`io::load_labels`]).  Use
/// [`EegDataset::load`] to start from files.
///
/// # Pipeline steps
///
/// 1. Drop the last [`PreprocessConfig::trim`] samples of every trial.
/// 2. Expand every trial into [`PreprocessConfig::subsample`] phase copies,
///    tiling the labels to match.
/// 3. Shuffle and hold out `floor(N × validation_size)` trials.
/// 4. Moving-average the training trials with window
///    [`PreprocessConfig::mov_avg`] (and the validation trials if
///    [`DatasetOptions::smooth_validation`]).
///
/// # Errors
///
/// Returns a [`DatasetError`] (wrapped in `anyhow`) if the settings do not
/// fit the time axis, if trial and label counts differ, if there are no
/// trials, or if `validation_size` is outside `[0, 1)`.  Nothing is returned
/// on failure.
///
/// # Examples
///
/// ```
/// use eegdata::{preprocess, Dataset, DatasetOptions, PreprocessConfig};
/// use ndarray::{Array1, Array3};
///
/// let data   = Array3::<f32>::zeros((100, 4, 200));
/// let labels = Array1::<i64>::zeros(100);
/// let cfg    = PreprocessConfig { subsample: 2, mov_avg: 5, trim: 10 };
///
/// let ds = preprocess(data, labels, cfg, DatasetOptions::no_validation()).unwrap();
/// assert_eq!(ds.len(), 200);
/// assert_eq!(ds.n_times(), 91);
/// ```
pub fn preprocess(
    data: Array3<f32>,
    labels: Array1<i64>,
    config: PreprocessConfig,
    options: DatasetOptions,
) -> Result<EegDataset> {
    let n_trials = data.len_of(Axis(0));
    if n_trials != labels.len() {
        return Err(DatasetError::LabelCountMismatch { trials: n_trials, labels: labels.len() }.into());
    }
    if n_trials == 0 {
        return Err(DatasetError::EmptyDataset.into());
    }
    // Reject bad settings before any array work.
    let n_t = data.dim().2;
    if config.subsample == 0 {
        return Err(DatasetError::ZeroParameter { name: "subsample" }.into());
    }
    if config.mov_avg == 0 {
        return Err(DatasetError::ZeroParameter { name: "mov_avg" }.into());
    }
    if config.trim >= n_t {
        return Err(DatasetError::TrimTooLarge { trim: config.trim, n_times: n_t }.into());
    }
    let n_kept = n_t - config.trim;
    if config.subsample > n_kept {
        return Err(DatasetError::SubsampleTooLarge { stride: config.subsample, n_times: n_kept }.into());
    }
    let n_expanded = n_trials
        .checked_mul(config.subsample)
        .ok_or(DatasetError::SubsampleTooLarge { stride: config.subsample, n_times: n_kept })?;
    split::validation_count(n_expanded, options.validation_size)?;

    // 1. Trim.
    let data = if config.trim > 0 { trim::trim_time(&data, config.trim)? } else { data };
    log::debug!("trim {} → {:?}", config.trim, data.dim());

    // 2. Subsample augmentation.
    let (data, labels) = subsample::subsample_expand(&data, &labels, config.subsample)?;
    log::debug!("subsample {} → {:?}", config.subsample, data.dim());
    if config.mov_avg > data.dim().2 {
        return Err(DatasetError::WindowTooLarge { window: config.mov_avg, n_times: data.dim().2 }.into());
    }

    // 3. Shuffle + validation split.
    let mut rng = split::split_rng(options.seed);
    let parts = split::shuffle_split(&data, &labels, options.validation_size, &mut rng)?;
    drop(data);
    log::debug!(
        "split → {} train / {} validation",
        parts.train_labels.len(),
        parts.val_labels.len()
    );

    // 4. Moving average.
    let train_data = smooth::moving_average_time(&parts.train_data, config.mov_avg)?;
    let val_data = if options.smooth_validation {
        smooth::moving_average_time(&parts.val_data, config.mov_avg)?
    } else {
        parts.val_data
    };
    log::debug!("mov_avg {} → {:?}", config.mov_avg, train_data.dim());

    let train = TrialSet::new(train_data, parts.train_labels)?;
    let validation = TrialSet::new(val_data, parts.val_labels)?;
    log::info!(
        "built dataset: {} train + {} validation trials, {} ch × {} samples",
        train.len(),
        validation.len(),
        train.n_channels(),
        train.n_times()
    );
    Ok(EegDataset::from_parts(train, validation, config, options))
}
