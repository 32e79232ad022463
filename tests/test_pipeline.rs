mod common;
use common::{raw_labels, sine_trials, tagged_trials, write_fixture};
use eegdata::{
    moving_average, normalize_labels, preprocess, Dataset, DatasetError, DatasetOptions,
    EegDataset, PreprocessConfig,
};
use ndarray::{s, Array1, Array3};

fn no_split(seed: u64) -> DatasetOptions {
    DatasetOptions { validation_size: 0.0, seed: Some(seed), smooth_validation: false }
}

fn dataset_error(err: &anyhow::Error) -> &DatasetError {
    err.downcast_ref::<DatasetError>()
        .unwrap_or_else(|| panic!("expected DatasetError, got {err:#}"))
}

#[test]
fn reference_scenario_shapes() {
    // (100, 4, 200) → trim 10 → 190 → subsample 2 → 200 × 95 → mov_avg 5 → 91
    let x = write_fixture("x.npy", &sine_trials(100, 4, 200));
    let y = write_fixture("y.npy", &raw_labels(100));
    let cfg = PreprocessConfig { subsample: 2, mov_avg: 5, trim: 10 };

    let ds = EegDataset::load(&x, &y, cfg, no_split(0)).unwrap();
    assert_eq!(ds.data().dim(), (200, 4, 91));
    assert_eq!(ds.len(), 200);
    assert_eq!(ds.labels().len(), 200);
    assert_eq!(ds.validation().len(), 0);
    assert_eq!(*ds.config(), cfg);

    let sample = ds.get(17).unwrap();
    assert_eq!(sample.data.dim(), (4, 91));
    assert_eq!(sample.label, ds.labels()[17]);
}

#[test]
fn identity_settings_only_shift_labels() {
    let data = sine_trials(12, 3, 64);
    let x = write_fixture("x.npy", &data);
    let y = write_fixture("y.npy", &raw_labels(12));

    // validation 0 still permutes, so compare per trial via the tagged label
    let ds = EegDataset::load(&x, &y, PreprocessConfig::default(), no_split(5)).unwrap();
    assert_eq!(ds.data().dim(), data.dim());

    let mut seen = vec![false; 12];
    for sample in ds.iter() {
        let k = (0..12)
            .find(|&k| data.slice(s![k, .., ..]) == sample.data.view())
            .expect("trial not found in input");
        assert!(!seen[k], "trial {k} appears twice");
        seen[k] = true;
        assert_eq!(sample.label, (k % 4) as i64);
    }
    assert!(seen.iter().all(|&v| v));
}

#[test]
fn expanded_copies_carry_original_label() {
    // Tag every trial's samples with its index so the origin of each output
    // trial can be recovered after the shuffle.
    let data = tagged_trials(9, 2, 30);
    let labels = normalize_labels(&raw_labels(9));
    let cfg = PreprocessConfig { subsample: 3, ..PreprocessConfig::default() };
    let ds = preprocess(data, labels.clone(), cfg, no_split(11)).unwrap();

    assert_eq!(ds.len(), 27);
    let mut per_phase = vec![[0usize; 3]; 9];
    for sample in ds.iter() {
        let first = sample.data[[0, 0]] as usize;
        let (trial, phase) = (first / 10_000, first % 1_000);
        assert_eq!(sample.label, labels[trial]);
        per_phase[trial][phase] += 1;
        // consecutive samples are `subsample` apart
        assert_eq!(sample.data[[0, 1]] - sample.data[[0, 0]], 3.0);
    }
    assert!(per_phase.iter().all(|p| *p == [1, 1, 1]));
}

#[test]
fn smoothing_matches_reference_lane() {
    let data = sine_trials(1, 2, 40);
    let labels = Array1::from(vec![0_i64]);
    let cfg = PreprocessConfig { mov_avg: 7, ..PreprocessConfig::default() };
    let ds = preprocess(data.clone(), labels, cfg, no_split(0)).unwrap();

    assert_eq!(ds.n_times(), 34);
    for c in 0..2 {
        let want = moving_average(data.slice(s![0, c, ..]), 7).unwrap();
        let got: Array1<f32> = ds.data().slice(s![0, c, ..]).to_owned();
        for (g, w) in got.iter().zip(want.iter()) {
            approx::assert_abs_diff_eq!(*g, *w, epsilon = 1e-5);
        }
        let mean0 = data.slice(s![0, c, ..7]).mean().unwrap();
        approx::assert_abs_diff_eq!(got[0], mean0, epsilon = 1e-5);
    }
}

#[test]
fn validation_split_is_unsmoothed_by_default() {
    let data = sine_trials(50, 3, 100);
    let labels = Array1::from_iter((0..50).map(|k| k % 4));
    let cfg = PreprocessConfig { subsample: 2, mov_avg: 4, trim: 0 };
    let opts = DatasetOptions { validation_size: 0.1, seed: Some(3), smooth_validation: false };

    let ds = preprocess(data, labels, cfg, opts).unwrap();
    assert_eq!(ds.validation().len(), 10);
    assert_eq!(ds.len(), 90);
    assert_eq!(ds.validation().n_times(), 50);
    assert_eq!(ds.n_times(), 47);
}

#[test]
fn validation_can_be_smoothed() {
    let data = sine_trials(50, 3, 100);
    let labels = Array1::from_iter((0..50).map(|k| k % 4));
    let cfg = PreprocessConfig { subsample: 2, mov_avg: 4, trim: 0 };
    let opts = DatasetOptions { validation_size: 0.1, seed: Some(3), smooth_validation: true };

    let ds = preprocess(data, labels, cfg, opts).unwrap();
    assert_eq!(ds.validation().n_times(), 47);
}

#[test]
fn same_seed_reproduces_dataset() {
    let cfg = PreprocessConfig { subsample: 2, mov_avg: 3, trim: 4 };
    let opts = DatasetOptions { seed: Some(99), ..DatasetOptions::default() };
    let a = preprocess(sine_trials(20, 2, 50), Array1::from_iter(0..20), cfg, opts).unwrap();
    let b = preprocess(sine_trials(20, 2, 50), Array1::from_iter(0..20), cfg, opts).unwrap();
    assert_eq!(a.labels(), b.labels());
    assert_eq!(a.validation().labels(), b.validation().labels());
    assert_eq!(a.data(), b.data());
}

#[test]
fn split_preserves_every_trial() {
    let opts = DatasetOptions { validation_size: 0.3, seed: Some(1), smooth_validation: false };
    let ds = preprocess(tagged_trials(40, 1, 8), Array1::from_iter(0..40), PreprocessConfig::default(), opts)
        .unwrap();
    assert_eq!(ds.len() + ds.validation().len(), 40);
    let mut all: Vec<i64> = ds.labels().iter().chain(ds.validation().labels().iter()).copied().collect();
    all.sort_unstable();
    assert_eq!(all, (0..40).collect::<Vec<_>>());
}

#[test]
fn oversized_trim_fails() {
    let err = preprocess(
        Array3::zeros((4, 2, 20)),
        Array1::zeros(4),
        PreprocessConfig { trim: 20, ..PreprocessConfig::default() },
        no_split(0),
    )
    .unwrap_err();
    assert_eq!(dataset_error(&err), &DatasetError::TrimTooLarge { trim: 20, n_times: 20 });
}

#[test]
fn oversized_subsample_fails() {
    let err = preprocess(
        Array3::zeros((4, 2, 20)),
        Array1::zeros(4),
        PreprocessConfig { subsample: 6, trim: 15, ..PreprocessConfig::default() },
        no_split(0),
    )
    .unwrap_err();
    assert_eq!(dataset_error(&err), &DatasetError::SubsampleTooLarge { stride: 6, n_times: 5 });
}

#[test]
fn huge_subsample_is_an_error_not_an_overflow() {
    let err = preprocess(
        Array3::zeros((4, 1, 8)),
        Array1::zeros(4),
        PreprocessConfig { subsample: usize::MAX, ..PreprocessConfig::default() },
        DatasetOptions { seed: Some(0), ..DatasetOptions::default() },
    )
    .unwrap_err();
    assert_eq!(
        dataset_error(&err),
        &DatasetError::SubsampleTooLarge { stride: usize::MAX, n_times: 8 }
    );
}

#[test]
fn held_out_count_truncates_like_python_int() {
    // int(10 * 0.7) == 7
    let opts = DatasetOptions { validation_size: 0.7, seed: Some(2), smooth_validation: false };
    let ds = preprocess(tagged_trials(10, 1, 4), Array1::from_iter(0..10), PreprocessConfig::default(), opts)
        .unwrap();
    assert_eq!(ds.validation().len(), 7);
    assert_eq!(ds.len(), 3);
}

#[test]
fn oversized_window_fails() {
    // 20 → trim 2 → 18 → subsample 3 → 6 samples; window 7 does not fit
    let err = preprocess(
        Array3::zeros((4, 2, 20)),
        Array1::zeros(4),
        PreprocessConfig { subsample: 3, mov_avg: 7, trim: 2 },
        no_split(0),
    )
    .unwrap_err();
    assert_eq!(dataset_error(&err), &DatasetError::WindowTooLarge { window: 7, n_times: 6 });
}

#[test]
fn label_count_mismatch_fails() {
    let x = write_fixture("x.npy", &sine_trials(5, 2, 10));
    let y = write_fixture("y.npy", &raw_labels(4));
    let err = EegDataset::load(&x, &y, PreprocessConfig::default(), no_split(0)).unwrap_err();
    assert_eq!(dataset_error(&err), &DatasetError::LabelCountMismatch { trials: 5, labels: 4 });
}

#[test]
fn bad_validation_size_and_empty_input_fail() {
    let opts = DatasetOptions { validation_size: 1.0, ..DatasetOptions::default() };
    let err = preprocess(Array3::zeros((4, 1, 5)), Array1::zeros(4), PreprocessConfig::default(), opts)
        .unwrap_err();
    assert_eq!(dataset_error(&err), &DatasetError::InvalidValidationSize(1.0));

    let err = preprocess(Array3::zeros((0, 1, 5)), Array1::zeros(0), PreprocessConfig::default(), no_split(0))
        .unwrap_err();
    assert_eq!(dataset_error(&err), &DatasetError::EmptyDataset);
}

#[test]
fn out_of_range_access_fails() {
    let ds = preprocess(sine_trials(6, 2, 10), Array1::zeros(6), PreprocessConfig::default(), no_split(0))
        .unwrap();
    assert_eq!(ds.get(6), Err(DatasetError::IndexOutOfRange { index: 6, len: 6 }));
    assert!(ds.get_batch(&[0, 99]).is_err());
    let batch = ds.get_batch(&[5, 1]).unwrap();
    assert_eq!(batch.data.dim(), (2, 2, 10));
    assert_eq!(batch.labels.len(), 2);
}
