// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run in order:
//
//   Step 1: Generate synthetic sequences   (Layer 4 - data)
//   Step 2: Split train/validation         (Layer 4 - data)
//   Step 3: Build datasets                 (Layer 4 - data)
//   Step 4: Pick the backend for --device  (Layer 5 - ml)
//   Step 5: Build (or warm-start) and train (Layer 5 - ml)
//   Step 6: Optional metrics / checkpoint  (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Context, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu},
    tensor::backend::AutodiffBackend,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::SequenceDataset,
    generator::{SyntheticConfig, SyntheticGenerator},
    splitter::split_train_val,
};
use crate::domain::{loss_history::LossHistory, traits::SequenceSource};
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::{
    model::AutoencoderConfig,
    trainer::{train_autoencoder, TrainingConfig},
};

/// Where tensors live during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceKind {
    /// NdArray backend on the host CPU
    #[default]
    Cpu,
    /// WGPU backend on the default adapter
    Gpu,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything one run needs, from data generation to optional
// output directories. Serialisable so a checkpoint records
// exactly how its model was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub num_samples:    usize,
    pub max_value:      u32,
    pub width:          usize,
    /// Seeds data generation, the split, and parameter init
    pub data_seed:      u64,
    pub train_fraction: f64,
    pub latent_dim:     usize,
    pub encoder_hidden: Vec<usize>,
    pub decoder_hidden: Vec<usize>,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    /// Seeds the data loader's shuffle
    pub seed:           u64,
    pub num_workers:    usize,
    pub log_every:      usize,
    pub device:         DeviceKind,
    pub metrics_dir:    Option<String>,
    pub checkpoint_dir: Option<String>,
    /// Start from the weights of an earlier --checkpoint-dir
    pub init_from:      Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_samples:    10_000,
            max_value:      10_000,
            width:          3,
            data_seed:      2021,
            train_fraction: 0.8,
            latent_dim:     1,
            encoder_hidden: vec![5],
            decoder_hidden: vec![5],
            epochs:         20,
            batch_size:     250,
            lr:             1e-2,
            seed:           0,
            num_workers:    2,
            log_every:      10,
            device:         DeviceKind::Cpu,
            metrics_dir:    None,
            checkpoint_dir: None,
            init_from:      None,
        }
    }
}

impl TrainConfig {
    fn synthetic(&self) -> SyntheticConfig {
        SyntheticConfig {
            num_samples: self.num_samples,
            max_value:   self.max_value,
            width:       self.width,
            seed:        self.data_seed,
        }
    }

    fn model(&self) -> AutoencoderConfig {
        AutoencoderConfig::new(
            self.width,
            self.latent_dim,
            self.encoder_hidden.clone(),
            self.decoder_hidden.clone(),
        )
    }

    /// True when a model built from `other` has the same layer shapes.
    fn same_architecture(&self, other: &TrainConfig) -> bool {
        self.width == other.width
            && self.latent_dim == other.latent_dim
            && self.encoder_hidden == other.encoder_hidden
            && self.decoder_hidden == other.decoder_hidden
    }

    fn training(&self) -> TrainingConfig {
        TrainingConfig::new()
            .with_epochs(self.epochs)
            .with_batch_size(self.batch_size)
            .with_learning_rate(self.lr)
            .with_seed(self.seed)
            .with_num_workers(self.num_workers)
            .with_log_every(self.log_every)
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<LossHistory> {
        let cfg = &self.config;

        // ── Step 1: Generate the synthetic dataset ───────────────────────────
        let generator = SyntheticGenerator::new(cfg.synthetic())
            .context("Invalid synthetic data settings")?;
        let samples = generator.sequences();
        tracing::info!(
            "Generated {} sequences of width {}",
            samples.len(),
            generator.width()
        );

        // ── Step 2: Train / validation split ─────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.data_seed);
        let (train_samples, val_samples) =
            split_train_val(samples, cfg.train_fraction, &mut rng);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(),
            val_samples.len()
        );

        // ── Step 3: Build Burn datasets ──────────────────────────────────────
        let train_dataset = SequenceDataset::new(train_samples);
        let val_dataset   = (!val_samples.is_empty())
            .then(|| SequenceDataset::new(val_samples));

        // ── Step 4–6: Train on the selected backend ──────────────────────────
        match cfg.device {
            DeviceKind::Cpu => {
                self.run::<Autodiff<NdArray>>(NdArrayDevice::Cpu, train_dataset, val_dataset)
            }
            DeviceKind::Gpu => {
                self.run::<Autodiff<Wgpu>>(WgpuDevice::default(), train_dataset, val_dataset)
            }
        }
    }

    fn run<B: AutodiffBackend>(
        &self,
        device:        B::Device,
        train_dataset: SequenceDataset,
        val_dataset:   Option<SequenceDataset>,
    ) -> Result<LossHistory> {
        let cfg       = &self.config;
        let model_cfg = cfg.model();
        model_cfg.validate().context("Invalid model settings")?;

        tracing::info!("Using device: {:?}", device);

        // Parameter init follows the data seed; the loader shuffle follows `seed`
        B::seed(cfg.data_seed);
        let mut model = model_cfg.init::<B>(&device);

        if let Some(dir) = &cfg.init_from {
            let manager = CheckpointManager::new(dir)?;
            let saved   = manager.load_config()?;
            if !cfg.same_architecture(&saved) {
                bail!(
                    "Checkpoint '{}' holds a {} → {:?} → {} model, expected {} → {:?} → {}",
                    dir, saved.width, saved.encoder_hidden, saved.latent_dim,
                    cfg.width, cfg.encoder_hidden, cfg.latent_dim,
                );
            }
            model = manager.load_model(model, &device)?;
            tracing::info!("Initialised weights from '{}'", dir);
        }

        tracing::info!(
            "Model ready: {} → {:?} → {} → {:?} → {}",
            model.input_dim(), cfg.encoder_hidden, model.latent_dim(), cfg.decoder_hidden,
            model.input_dim(),
        );

        let (model, history) = train_autoencoder(
            model,
            train_dataset,
            val_dataset,
            &cfg.training(),
            &device,
        )
        .context("Training failed")?;

        tracing::info!(
            "Final train MSE {:?}, final val MSE {:?}, best val epoch {:?}, mean improvement {:?}",
            history.final_train_loss(),
            history.final_val_loss(),
            history.best_val_epoch(),
            history.mean_improvement(),
        );

        // ── Optional outputs ──────────────────────────────────────────────────
        if let Some(dir) = &cfg.metrics_dir {
            let logger = MetricsLogger::new(dir)?;
            logger.log_history(&history)?;
            tracing::info!("Metrics written to '{}'", logger.csv_path().display());
        }

        if let Some(dir) = &cfg.checkpoint_dir {
            let manager = CheckpointManager::new(dir)?;
            manager.save_config(cfg)?;
            manager.save_model(&model)?;
            manager.save_history(&history)?;
            tracing::info!("Checkpoint saved to '{}'", dir);
        }

        Ok(history)
    }
}
