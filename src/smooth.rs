//! Moving-average smoothing along the time axis.
//!
//! `moving_average` is the "valid" convolution of a 1-D signal with a box
//! kernel of width `w`, divided by `w`:
//!
//! ```text
//! y[i] = (x[i] + x[i+1] + … + x[i+w-1]) / w,   i = 0 .. L - w
//! ```
//!
//! so the output has `L − w + 1` samples.  `moving_average_time` applies it to
//! every (trial, channel) lane of an [N, C, T] tensor.
use ndarray::{Array1, Array3, ArrayView1, ArrayViewMut1, Axis, Zip};

use crate::error::DatasetError;

fn check_window(w: usize, len: usize) -> Result<(), DatasetError> {
    if w == 0 {
        return Err(DatasetError::ZeroParameter { name: "mov_avg" });
    }
    if w > len {
        return Err(DatasetError::WindowTooLarge { window: w, n_times: len });
    }
    Ok(())
}

/// Running-sum box filter written into `out` (length `x.len() - w + 1`).
/// Sums are carried in f64 so long lanes do not drift.
fn box_filter_into(x: ArrayView1<f32>, w: usize, mut out: ArrayViewMut1<f32>) {
    let inv_w = 1.0 / w as f64;
    let mut acc: f64 = x.iter().take(w).map(|&v| v as f64).sum();
    out[0] = (acc * inv_w) as f32;
    for i in 1..out.len() {
        acc += x[i + w - 1] as f64 - x[i - 1] as f64;
        out[i] = (acc * inv_w) as f32;
    }
}

/// Moving average of a single 1-D signal.
pub fn moving_average(x: ArrayView1<f32>, w: usize) -> Result<Array1<f32>, DatasetError> {
    check_window(w, x.len())?;
    if w == 1 {
        return Ok(x.to_owned());
    }
    let mut out = Array1::<f32>::zeros(x.len() - w + 1);
    box_filter_into(x, w, out.view_mut());
    Ok(out)
}

/// Moving average along `Axis(2)` of `data` ([N, C, T] → [N, C, T − w + 1]).
pub fn moving_average_time(data: &Array3<f32>, w: usize) -> Result<Array3<f32>, DatasetError> {
    let (n_trials, n_ch, n_t) = data.dim();
    check_window(w, n_t)?;
    if w == 1 {
        return Ok(data.clone());
    }
    let mut out = Array3::<f32>::zeros((n_trials, n_ch, n_t - w + 1));
    Zip::from(out.lanes_mut(Axis(2)))
        .and(data.lanes(Axis(2)))
        .for_each(|dst, src| box_filter_into(src, w, dst));
    Ok(out)
}
