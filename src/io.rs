//! File I/O.
//!
//! Reader: NumPy `.npy` trial tensors ([N, C, T]) and label vectors ([N]) as
//! written by `np.save`.  Labels come from the GDF event codes of the
//! recording (769 = left hand, 770 = right hand, …) and are shifted to
//! zero-based class indices on load.
//!
//! Writer: a minimal safetensors builder used by the CLIs to export the
//! processed dataset.
use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array3};
use ndarray_npy::{read_npy, ReadNpyError};
use std::path::Path;

use crate::dataset::EegDataset;

/// Event code of the first class; subtracted from every raw label.
pub const LABEL_OFFSET: i64 = 769;

// ── Readers ───────────────────────────────────────────────────────────────────

/// Load a [N, C, T] trial tensor.  `float32` is read as-is, `float64` is
/// narrowed to `f32`.
pub fn load_trials(path: &Path) -> Result<Array3<f32>> {
    let ctx = || format!("reading trial tensor {}", path.display());
    let data = match read_npy::<_, Array3<f32>>(path) {
        Ok(a) => a,
        Err(ReadNpyError::WrongDescriptor(_)) => {
            let a: Array3<f64> = read_npy(path).with_context(ctx)?;
            a.mapv(|v| v as f32)
        }
        Err(e) => return Err(e).with_context(ctx),
    };
    log::debug!("loaded trials {:?} from {}", data.dim(), path.display());
    Ok(data)
}

/// Load a raw label vector without the offset applied.
///
/// Accepts `int64`, `int32`, `uint8` and integral `float32` / `float64` arrays.
pub fn load_raw_labels(path: &Path) -> Result<Array1<i64>> {
    let ctx = || {
        format!(
            "reading label vector {} (expected int64, int32, uint8, float32 or float64)",
            path.display()
        )
    };
    match read_npy::<_, Array1<i64>>(path) {
        Ok(a) => return Ok(a),
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        Err(e) => return Err(e).with_context(ctx),
    }
    match read_npy::<_, Array1<i32>>(path) {
        Ok(a) => return Ok(a.mapv(i64::from)),
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        Err(e) => return Err(e).with_context(ctx),
    }
    match read_npy::<_, Array1<u8>>(path) {
        Ok(a) => return Ok(a.mapv(i64::from)),
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        Err(e) => return Err(e).with_context(ctx),
    }
    let a: Array1<f64> = match read_npy::<_, Array1<f32>>(path) {
        Ok(a) => a.mapv(f64::from),
        Err(ReadNpyError::WrongDescriptor(_)) => read_npy(path).with_context(ctx)?,
        Err(e) => return Err(e).with_context(ctx),
    };
    if let Some(v) = a.iter().find(|v| v.fract() != 0.0) {
        bail!("{}: non-integral label {v}", path.display());
    }
    Ok(a.mapv(|v| v as i64))
}

/// Shift raw event codes to zero-based class indices.
pub fn normalize_labels(raw: &Array1<i64>) -> Array1<i64> {
    raw.mapv(|v| v - LABEL_OFFSET)
}

/// Load a label vector and shift it by [`LABEL_OFFSET`].
pub fn load_labels(path: &Path) -> Result<Array1<i64>> {
    let labels = normalize_labels(&load_raw_labels(path)?);
    log::debug!("loaded {} labels from {}", labels.len(), path.display());
    Ok(labels)
}

// ── Generic safetensors builder ───────────────────────────────────────────────

/// Simple safetensors file writer that handles F32, I64 and I32 tensors.
///
/// Usage:
/// ```rust,no_run
/// use eegdata::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f32("signal", &[1.0f32, 2.0, 3.0], &[1, 3]);
/// w.add_i64("label", &[0, 1, 1], &[3]);
/// w.add_metadata("source", "session A01T");
/// w.write(Path::new("/tmp/out.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct StWriter {
    entries: Vec<(String, Vec<u8>, &'static str, Vec<usize>)>,
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_f32(&mut self, name: &str, data: &[f32], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "F32", shape.to_vec()));
    }

    pub fn add_f32_arr3(&mut self, name: &str, arr: &Array3<f32>) {
        let data: Vec<f32> = arr.iter().copied().collect();
        let (n, c, t) = arr.dim();
        self.add_f32(name, &data, &[n, c, t]);
    }

    pub fn add_i64(&mut self, name: &str, data: &[i64], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "I64", shape.to_vec()));
    }

    pub fn add_i64_arr1(&mut self, name: &str, arr: &Array1<i64>) {
        let data: Vec<i64> = arr.iter().copied().collect();
        self.add_i64(name, &data, &[arr.len()]);
    }

    pub fn add_i32(&mut self, name: &str, data: &[i32], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "I32", shape.to_vec()));
    }

    /// String entry for the `__metadata__` header block.
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        use std::io::Write;
        let mut header_map = serde_json::Map::new();
        if !self.metadata.is_empty() {
            header_map.insert("__metadata__".into(), serde_json::Value::Object(self.metadata.clone()));
        }
        let mut offset: usize = 0;
        for (name, data, dtype, shape) in &self.entries {
            header_map.insert(name.clone(), serde_json::json!({
                "dtype": dtype,
                "shape": shape,
                "data_offsets": [offset, offset + data.len()],
            }));
            offset += data.len();
        }
        let hdr_bytes = serde_json::to_vec(&header_map)?;
        let pad = (8 - hdr_bytes.len() % 8) % 8;
        let padded: Vec<u8> = hdr_bytes.into_iter()
            .chain(std::iter::repeat(b' ').take(pad))
            .collect();
        let mut f = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        f.write_all(&(padded.len() as u64).to_le_bytes())?;
        f.write_all(&padded)?;
        for (_, data, _, _) in &self.entries {
            f.write_all(data)?;
        }
        Ok(())
    }
}

// ── Dataset writer ────────────────────────────────────────────────────────────

/// Write a built dataset to a safetensors file.
///
/// Keys:
///   train_data    [N, C, T']   f32
///   train_labels  [N]          i64
///   val_data      [V, C, T'']  f32
///   val_labels    [V]          i64
///   subsample / mov_avg / trim  [1]  i32
///
/// The config is also stored as JSON under `__metadata__.preprocess`.
pub fn write_dataset(ds: &EegDataset, path: &Path) -> Result<()> {
    let mut w = StWriter::new();
    w.add_f32_arr3("train_data", ds.data());
    w.add_i64_arr1("train_labels", ds.labels());
    w.add_f32_arr3("val_data", ds.validation().data());
    w.add_i64_arr1("val_labels", ds.validation().labels());

    let cfg = ds.config();
    w.add_metadata("preprocess", &serde_json::to_string(cfg)?);
    for (key, v) in [("subsample", cfg.subsample), ("mov_avg", cfg.mov_avg), ("trim", cfg.trim)] {
        w.add_i32(key, &[i32::try_from(v).context("config value overflows i32")?], &[1]);
    }
    w.write(path)
}

