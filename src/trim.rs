//! Trailing-sample trim.
//!
//! `data`: [N, C, T]  →  `data[.., .., ..T - trim]`
use ndarray::{s, Array3};

use crate::error::DatasetError;

/// Drop the last `trim` time-steps of every trial.
///
/// At least one sample must survive; `trim >= T` is an error rather than an
/// empty tensor.
pub fn trim_time(data: &Array3<f32>, trim: usize) -> Result<Array3<f32>, DatasetError> {
    let n_t = data.dim().2;
    if trim >= n_t {
        return Err(DatasetError::TrimTooLarge { trim, n_times: n_t });
    }
    Ok(data.slice(s![.., .., ..n_t - trim]).to_owned())
}
