//! Pipeline configuration.
//!
//! [`PreprocessConfig`] holds the three preprocessing knobs (subsample stride,
//! moving-average window, trim count).  [`DatasetOptions`] holds everything
//! about how the processed trials are partitioned.  Both default to the
//! identity / standard settings and are passed by value at construction, so a
//! built dataset can always report exactly what was applied to it.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preprocessing parameters.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use eegdata::PreprocessConfig;
///
/// let cfg = PreprocessConfig {
///     subsample: 2,   // double the trial count, halve the time resolution
///     mov_avg:   5,
///     ..PreprocessConfig::default()
/// };
/// assert_eq!(cfg.trim, 0);
/// ```
///
/// It can also be read from the JSON object used by the training scripts:
///
/// ```
/// use eegdata::PreprocessConfig;
///
/// let cfg = PreprocessConfig::from_json_str(r#"{ "subsample": 4, "trim": 500 }"#).unwrap();
/// assert_eq!(cfg.subsample, 4);
/// assert_eq!(cfg.mov_avg, 1);
/// assert_eq!(cfg.trim, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessConfig {
    /// Stride of the subsampling augmentation.
    ///
    /// Each trial is expanded into `subsample` down-sampled copies, one per
    /// phase offset, so the trial count is multiplied and the time length is
    /// divided by this value.
    ///
    /// Default: `1` (no expansion).
    pub subsample: usize,

    /// Width of the moving-average window applied along the time axis.
    ///
    /// A window of `w` shortens every trial by `w − 1` samples.
    ///
    /// Default: `1` (identity).
    pub mov_avg: usize,

    /// Number of trailing time-steps dropped from every trial before any
    /// other processing.
    ///
    /// Default: `0`.
    pub trim: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { subsample: 1, mov_avg: 1, trim: 0 }
    }
}

impl PreprocessConfig {
    /// Parse from a JSON object.  Missing keys take their defaults; unknown
    /// keys are an error.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parsing preprocessing config")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Time length left after trimming and subsampling a trial of `n_times`
    /// samples, before smoothing.  `None` if the settings do not fit.
    pub fn expanded_len(&self, n_times: usize) -> Option<usize> {
        if self.subsample == 0 || self.trim >= n_times {
            return None;
        }
        match (n_times - self.trim) / self.subsample {
            0 => None,
            n => Some(n),
        }
    }

    /// Final per-trial time length after all three steps.
    ///
    /// ```
    /// use eegdata::PreprocessConfig;
    /// let cfg = PreprocessConfig { subsample: 2, mov_avg: 5, trim: 10 };
    /// assert_eq!(cfg.output_len(200), Some(91));
    /// ```
    pub fn output_len(&self, n_times: usize) -> Option<usize> {
        let t = self.expanded_len(n_times)?;
        if self.mov_avg == 0 || self.mov_avg > t {
            return None;
        }
        Some(t - self.mov_avg + 1)
    }
}

/// How the processed trials are partitioned.
///
/// ```
/// use eegdata::DatasetOptions;
///
/// let opts = DatasetOptions { seed: Some(7), ..DatasetOptions::default() };
/// assert_eq!(opts.validation_size, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetOptions {
    /// Fraction of (expanded) trials held out for validation, in `[0, 1)`.
    ///
    /// The held-out count is `floor(n_trials × validation_size)`.
    ///
    /// Default: `0.1`.
    pub validation_size: f64,

    /// Seed for the shuffle that precedes the split.  `None` draws one from
    /// the OS entropy source, so two builds will differ.
    ///
    /// Default: `None`.
    pub seed: Option<u64>,

    /// Also run the moving average over the validation trials.  When `false`
    /// the validation set keeps the pre-smoothing time length.
    ///
    /// Default: `false`.
    pub smooth_validation: bool,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self { validation_size: 0.1, seed: None, smooth_validation: false }
    }
}

impl DatasetOptions {
    /// Options that keep every trial in the training set.
    pub fn no_validation() -> Self {
        Self { validation_size: 0.0, ..Self::default() }
    }
}
