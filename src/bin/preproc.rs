use anyhow::Result;
use clap::Parser;
use eegdata::{write_dataset, Dataset, DatasetOptions, EegDataset, PreprocessConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "preproc", about = "Build a preprocessed EEG trial dataset from .npy files")]
struct Args {
    /// Trial tensor [N, C, T] (.npy)
    #[arg(long)]
    data: PathBuf,

    /// Label vector [N] of raw event codes (.npy)
    #[arg(long)]
    labels: PathBuf,

    /// JSON file with `subsample` / `mov_avg` / `trim`; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subsampling stride (default: 1)
    #[arg(long)]
    subsample: Option<usize>,

    /// Moving-average window (default: 1)
    #[arg(long)]
    mov_avg: Option<usize>,

    /// Trailing samples to drop (default: 0)
    #[arg(long)]
    trim: Option<usize>,

    /// Fraction of trials held out for validation
    #[arg(long, default_value_t = 0.1)]
    validation_size: f64,

    /// Shuffle seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Smooth the validation trials as well
    #[arg(long)]
    smooth_validation: bool,

    /// safetensors output path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => PreprocessConfig::from_json_file(path)?,
        None => PreprocessConfig::default(),
    };
    if let Some(v) = args.subsample { cfg.subsample = v; }
    if let Some(v) = args.mov_avg { cfg.mov_avg = v; }
    if let Some(v) = args.trim { cfg.trim = v; }

    let opts = DatasetOptions {
        validation_size: args.validation_size,
        seed: args.seed,
        smooth_validation: args.smooth_validation,
    };

    let ds = EegDataset::load(&args.data, &args.labels, cfg, opts)?;
    println!("Config: subsample={} mov_avg={} trim={}", cfg.subsample, cfg.mov_avg, cfg.trim);
    println!("Train:      {} trials × {} ch × {} samples",
        ds.len(), ds.n_channels(), ds.n_times());
    println!("Validation: {} trials × {} ch × {} samples",
        ds.validation().len(), ds.validation().n_channels(), ds.validation().n_times());

    if let Some(out) = &args.output {
        write_dataset(&ds, out)?;
        println!("Written → {}", out.display());
    }

    Ok(())
}
