/// pipeline_steps: load trials + labels, run each preprocessing step on the
/// whole tensor (no shuffle, no split), and write every intermediate array to
/// a safetensors file for comparison against the NumPy reference.
///
/// Output keys:
///   raw           [N, C, T]              f32  trials as loaded
///   labels        [N]                    i64  labels − 769
///   trim          [N, C, T−trim]         f32  after trim
///   subsample     [N·s, C, (T−trim)/s]   f32  after subsample expansion
///   sub_labels    [N·s]                  i64  labels tiled s times
///   smooth        [N·s, C, …−w+1]        f32  after moving average
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use eegdata::{
    io::{load_labels, load_trials, StWriter},
    smooth::moving_average_time,
    subsample::subsample_expand,
    trim::trim_time,
};

#[derive(Parser, Debug)]
#[command(name = "pipeline_steps")]
struct Args {
    /// Trial tensor (.npy).
    #[arg(long)]
    data: PathBuf,

    /// Label vector (.npy).
    #[arg(long)]
    labels: PathBuf,

    /// Output safetensors path.
    #[arg(long)]
    output: PathBuf,

    /// Subsampling stride.
    #[arg(long, default_value_t = 1)]
    subsample: usize,

    /// Moving-average window.
    #[arg(long, default_value_t = 1)]
    mov_avg: usize,

    /// Trailing samples to drop.
    #[arg(long, default_value_t = 0)]
    trim: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // ── 1. Load ────────────────────────────────────────────────────────────
    let t_load = Instant::now();
    let raw = load_trials(&args.data)?;
    let labels = load_labels(&args.labels)?;
    let ms_load = t_load.elapsed().as_secs_f64() * 1000.0;

    // ── 2. Trim ────────────────────────────────────────────────────────────
    let t_trim = Instant::now();
    let trimmed = trim_time(&raw, args.trim)?;
    let ms_trim = t_trim.elapsed().as_secs_f64() * 1000.0;

    // ── 3. Subsample ───────────────────────────────────────────────────────
    let t_sub = Instant::now();
    let (expanded, sub_labels) = subsample_expand(&trimmed, &labels, args.subsample)?;
    let ms_sub = t_sub.elapsed().as_secs_f64() * 1000.0;

    // ── 4. Moving average ──────────────────────────────────────────────────
    let t_sm = Instant::now();
    let smoothed = moving_average_time(&expanded, args.mov_avg)?;
    let ms_sm = t_sm.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "TIMING load={ms_load:.4}ms trim={ms_trim:.4}ms subsample={ms_sub:.4}ms smooth={ms_sm:.4}ms"
    );
    eprintln!("  {:?} → {:?}", raw.dim(), smoothed.dim());

    // ── 5. Write output ────────────────────────────────────────────────────
    eprintln!("Writing → {}", args.output.display());
    let mut w = StWriter::new();
    w.add_f32_arr3("raw",       &raw);
    w.add_i64_arr1("labels",    &labels);
    w.add_f32_arr3("trim",      &trimmed);
    w.add_f32_arr3("subsample", &expanded);
    w.add_i64_arr1("sub_labels", &sub_labels);
    w.add_f32_arr3("smooth",    &smoothed);
    w.write(&args.output)?;

    eprintln!("Done.");
    Ok(())
}
