/// Shared helpers: synthetic trials and temporary `.npy` fixtures.
use ndarray::{Array1, Array3};
use ndarray_npy::{write_npy, WritableElement};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path under the system temp dir for this test process.
pub fn temp_path(name: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("eegdata-{}-{n}-{name}", std::process::id()))
}

#[allow(unused)]
/// Write `arr` to a fresh `.npy` file and return its path.
pub fn write_fixture<A, D>(name: &str, arr: &ndarray::Array<A, D>) -> PathBuf
where
    A: WritableElement,
    D: ndarray::Dimension,
{
    let path = temp_path(name);
    write_npy(&path, arr).unwrap_or_else(|e| panic!("writing {}: {e}", path.display()));
    path
}

#[allow(unused)]
/// [N, C, T] tensor where every value encodes its own (trial, channel, time).
pub fn tagged_trials(n: usize, c: usize, t: usize) -> Array3<f32> {
    Array3::from_shape_fn((n, c, t), |(n, c, t)| (n * 10_000 + c * 1_000 + t) as f32)
}

#[allow(unused)]
/// Smooth-ish multi-channel signal for value checks.
pub fn sine_trials(n: usize, c: usize, t: usize) -> Array3<f32> {
    Array3::from_shape_fn((n, c, t), |(n, c, t)| {
        ((n as f32 * 0.7 + c as f32 * 1.3 + t as f32 * 0.05).sin()) * 25.0
    })
}

#[allow(unused)]
/// Raw event-code labels cycling through the four motor-imagery classes.
pub fn raw_labels(n: usize) -> Array1<i64> {
    Array1::from_iter((0..n as i64).map(|k| 769 + k % 4))
}
