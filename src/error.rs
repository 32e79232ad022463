//! Error taxonomy for dataset construction and access.
//!
//! File-level failures (missing file, wrong dtype, wrong rank) are reported
//! through `anyhow` with the offending path attached.  Everything that can go
//! wrong *after* the arrays are in memory is a [`DatasetError`], so callers can
//! `downcast_ref::<DatasetError>()` and match on the variant.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// A parameter that must be ≥ 1 was 0 (`subsample`, `mov_avg`).
    #[error("`{name}` must be at least 1")]
    ZeroParameter { name: &'static str },

    #[error("trim of {trim} time-steps leaves nothing of a {n_times}-sample time axis")]
    TrimTooLarge { trim: usize, n_times: usize },

    #[error("subsample stride {stride} exceeds the {n_times}-sample time axis")]
    SubsampleTooLarge { stride: usize, n_times: usize },

    #[error("moving-average window {window} exceeds the {n_times}-sample time axis")]
    WindowTooLarge { window: usize, n_times: usize },

    #[error("{trials} trials but {labels} labels")]
    LabelCountMismatch { trials: usize, labels: usize },

    #[error("validation size {0} is outside [0, 1)")]
    InvalidValidationSize(f64),

    #[error("dataset contains no trials")]
    EmptyDataset,

    #[error("index {index} is out of range for a dataset of {len} trials")]
    IndexOutOfRange { index: usize, len: usize },
}
