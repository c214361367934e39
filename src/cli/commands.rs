// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every flag has a default that reproduces the reference run,
// so the binary works with no arguments at all.
//
// clap's derive macros generate --help text, error messages,
// and string → number conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, ValueEnum};
use crate::application::train_use_case::{DeviceKind, TrainConfig};

/// Device choices accepted by --device
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceArg {
    /// NdArray CPU backend
    Cpu,
    /// WGPU backend (GPU when one is available)
    Gpu,
}

impl From<DeviceArg> for DeviceKind {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Cpu => DeviceKind::Cpu,
            DeviceArg::Gpu => DeviceKind::Gpu,
        }
    }
}

/// All arguments for a training run.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of synthetic sequences to generate
    #[arg(long, default_value_t = 10_000)]
    pub num_samples: usize,

    /// Sequence anchors are drawn uniformly from [0, max_value)
    #[arg(long, default_value_t = 10_000)]
    pub max_value: u32,

    /// Consecutive integers per sequence (the input dimension)
    #[arg(long, default_value_t = 3)]
    pub width: usize,

    /// Seed for data generation, the train/val split, and weight init
    #[arg(long, default_value_t = 2021)]
    pub data_seed: u64,

    /// Fraction of sequences used for training; the rest validate
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Size of the latent space
    #[arg(long, default_value_t = 1)]
    pub latent_dim: usize,

    /// Encoder hidden widths, comma separated (e.g. 8,4)
    #[arg(long, value_delimiter = ',', default_values_t = vec![5])]
    pub encoder_hidden: Vec<usize>,

    /// Decoder hidden widths, comma separated (e.g. 4,8)
    #[arg(long, value_delimiter = ',', default_values_t = vec![5])]
    pub decoder_hidden: Vec<usize>,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    /// Examples per mini-batch
    #[arg(long, default_value_t = 250)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-2)]
    pub lr: f64,

    /// Seed for the data loader's shuffle
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Background threads prefetching batches
    #[arg(long, default_value_t = 2)]
    pub num_workers: usize,

    /// Print progress every N epochs (0 = never)
    #[arg(long, default_value_t = 10)]
    pub log_every: usize,

    /// Backend to train on
    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,

    /// Write metrics.csv into this directory
    #[arg(long)]
    pub metrics_dir: Option<String>,

    /// Save the trained model, config, and loss history here
    #[arg(long)]
    pub checkpoint_dir: Option<String>,

    /// Start training from the weights saved in an earlier --checkpoint-dir
    #[arg(long)]
    pub init_from: Option<String>,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            num_samples:    a.num_samples,
            max_value:      a.max_value,
            width:          a.width,
            data_seed:      a.data_seed,
            train_fraction: a.train_fraction,
            latent_dim:     a.latent_dim,
            encoder_hidden: a.encoder_hidden,
            decoder_hidden: a.decoder_hidden,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            seed:           a.seed,
            num_workers:    a.num_workers,
            log_every:      a.log_every,
            device:         a.device.into(),
            metrics_dir:    a.metrics_dir,
            checkpoint_dir: a.checkpoint_dir,
            init_from:      a.init_from,
        }
    }
}
