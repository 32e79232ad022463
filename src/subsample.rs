//! Subsampling as augmentation.
//!
//! A trial sampled at rate `f` holds `s` interleaved trials at rate `f / s`:
//! phase `i` is `x[i], x[i + s], x[i + 2s], …`.  Splitting every trial into
//! its `s` phases multiplies the trial count by `s` and divides the time
//! length by `s`.
//!
//! Output layout along the trial axis is phase-major:
//!
//! ```text
//! [ phase 0 of trials 0..N | phase 1 of trials 0..N | … | phase s-1 ]
//! ```
//!
//! and the label vector is tiled the same way, so `labels_out[p * N + n] ==
//! labels[n]` for every phase `p`.
use ndarray::{s, Array1, Array3};

use crate::error::DatasetError;

/// Expand `data` ([N, C, T]) into `stride` phase copies ([N·stride, C, T/stride]).
///
/// Every copy is cut to `floor(T / stride)` samples so the phases stack; when
/// `T` is not a multiple of `stride` the trailing `T mod stride` samples of
/// the later phases are dropped.
pub fn subsample_expand<L: Clone>(
    data: &Array3<f32>,
    labels: &Array1<L>,
    stride: usize,
) -> Result<(Array3<f32>, Array1<L>), DatasetError> {
    if stride == 0 {
        return Err(DatasetError::ZeroParameter { name: "subsample" });
    }
    let (n_trials, n_ch, n_t) = data.dim();
    if labels.len() != n_trials {
        return Err(DatasetError::LabelCountMismatch { trials: n_trials, labels: labels.len() });
    }
    if stride > n_t {
        return Err(DatasetError::SubsampleTooLarge { stride, n_times: n_t });
    }
    if stride == 1 {
        return Ok((data.clone(), labels.clone()));
    }

    let n_out = n_t / stride;
    let mut data_out = Array3::<f32>::zeros((n_trials * stride, n_ch, n_out));
    for i in 0..stride {
        // last index taken is i + (n_out - 1)·stride ≤ T - 1
        let end = i + (n_out - 1) * stride + 1;
        data_out
            .slice_mut(s![i * n_trials..(i + 1) * n_trials, .., ..])
            .assign(&data.slice(s![.., .., i..end;stride]));
    }
    let labels_out: Array1<L> = labels.iter().cycle().take(n_trials * stride).cloned().collect();

    Ok((data_out, labels_out))
}
