// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch Adam training with whole-dataset evaluation after
// every epoch.
//
//   per step:  forward → MSE → backward → Adam step
//   per epoch: model.valid() → MSE on the full training set
//                            → MSE on the full validation set
//
// model.valid() returns a copy of the parameters on the inner
// (non-autodiff) backend, so evaluation builds no graph and
// cannot change the weights being trained.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::{batcher::SequenceBatcher, dataset::SequenceDataset};
use crate::domain::loss_history::LossHistory;
use crate::error::{AutoencoderError, Result as AeResult};
use crate::ml::model::Autoencoder;

#[derive(Config, Debug)]
pub struct TrainingConfig {
    /// Full passes over the training set
    #[config(default = 20)]
    pub epochs:        usize,
    #[config(default = 250)]
    pub batch_size:    usize,
    #[config(default = 1e-2)]
    pub learning_rate: f64,
    /// Seeds the loader's shuffle. Parameters are initialised by the
    /// caller before training starts.
    #[config(default = 0)]
    pub seed:          u64,
    /// Background threads prefetching batches.
    ///
    /// With more than one worker Burn gives each worker its own slice of
    /// the shuffled dataset, so every worker ends on its own short batch
    /// (100 rows, batch 32, 2 workers → 32, 18, 32, 18), and batches
    /// arrive in whatever order the workers finish. Use 1 for a
    /// reproducible loss curve.
    #[config(default = 2)]
    pub num_workers:   usize,
    /// Print progress every N epochs; 0 disables printing
    #[config(default = 10)]
    pub log_every:     usize,
}

/// Train `model` on `train_dataset` and return it with its loss curves.
///
/// When `val_dataset` is given its whole-set MSE is recorded after
/// every epoch alongside the training MSE.
pub fn train_autoencoder<B: AutodiffBackend>(
    model:         Autoencoder<B>,
    train_dataset: SequenceDataset,
    val_dataset:   Option<SequenceDataset>,
    config:        &TrainingConfig,
    device:        &B::Device,
) -> AeResult<(Autoencoder<B>, LossHistory)> {
    check_inputs(&model, &train_dataset, val_dataset.as_ref(), config)?;

    let mut model = model;

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().init();

    // ── Whole-dataset tensors (InnerBackend — no autodiff overhead) ───────────
    // Built once up front; every epoch evaluates against the same tensors.
    let eval_batcher = SequenceBatcher::<B::InnerBackend>::new(device.clone());
    let train_full   = eval_batcher.stack(train_dataset.samples());
    let val_full     = val_dataset
        .as_ref()
        .map(|ds| eval_batcher.stack(ds.samples()));

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(SequenceBatcher::<B>::new(device.clone()))
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(config.num_workers)
        .build(train_dataset);

    let mut history = LossHistory::new(val_full.is_some());

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 0..config.epochs {
        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.values);
            history.record_step(loss.clone().into_scalar().elem::<f64>());

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(config.learning_rate, model, grads);
        }

        let model_valid = model.valid();
        let train_loss  = evaluate_mse(&model_valid, train_full.clone());
        let val_loss    = val_full
            .as_ref()
            .map(|data| evaluate_mse(&model_valid, data.clone()));
        history.record_epoch(train_loss, val_loss);

        tracing::info!(
            "epoch {}/{} train_mse={:.6} val_mse={}",
            epoch + 1,
            config.epochs,
            train_loss,
            val_loss.map_or_else(|| "-".to_string(), |v| format!("{v:.6}")),
        );

        if config.log_every > 0 && epoch % config.log_every == 0 {
            println!("MSE Train Loss @ {epoch}: {train_loss}");
            if let Some(v) = val_loss {
                println!("MSE Val Loss @ {epoch}: {v}");
            }
        }
    }

    tracing::info!(
        "Training complete after {} epochs ({} steps)",
        history.epochs(),
        history.step_losses.len()
    );
    Ok((model, history))
}

/// Reconstruction MSE of `data` under `model`, read back to the host.
pub fn evaluate_mse<B: Backend>(model: &Autoencoder<B>, data: Tensor<B, 2>) -> f64 {
    let (loss, _) = model.forward_loss(data);
    loss.into_scalar().elem::<f64>()
}

fn check_inputs<B: Backend>(
    model:  &Autoencoder<B>,
    train:  &SequenceDataset,
    val:    Option<&SequenceDataset>,
    config: &TrainingConfig,
) -> AeResult<()> {
    if config.batch_size == 0 {
        return Err(AutoencoderError::invalid_config("batch_size must be > 0"));
    }
    if config.epochs == 0 {
        return Err(AutoencoderError::invalid_config("epochs must be > 0"));
    }
    if train.samples().is_empty() {
        return Err(AutoencoderError::empty_dataset("training set"));
    }
    if val.is_some_and(|ds| ds.samples().is_empty()) {
        return Err(AutoencoderError::empty_dataset("validation set"));
    }

    let expected = model.input_dim();
    for ds in std::iter::once(train).chain(val) {
        if let Some(found) = ds.find_width_mismatch(expected) {
            return Err(AutoencoderError::ShapeMismatch { expected, found });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    use crate::data::generator::{SyntheticConfig, SyntheticGenerator};
    use crate::domain::{sequence::Sequence, traits::SequenceSource};
    use crate::ml::model::AutoencoderConfig;

    type TestBackend = Autodiff<NdArray<f32>>;

    fn dataset(num_samples: usize, seed: u64) -> SequenceDataset {
        let cfg = SyntheticConfig { num_samples, max_value: 10, width: 3, seed };
        SequenceDataset::new(SyntheticGenerator::new(cfg).unwrap().sequences())
    }

    fn model() -> Autoencoder<TestBackend> {
        AutoencoderConfig::new(3, 1, vec![5], vec![5]).init(&Default::default())
    }

    fn quiet_config() -> TrainingConfig {
        TrainingConfig::new().with_log_every(0)
    }

    /// One worker keeps batch order fixed for a given shuffle seed.
    fn reproducible_config() -> TrainingConfig {
        quiet_config().with_num_workers(1)
    }

    #[test]
    fn test_history_lengths() {
        let config = quiet_config().with_epochs(3).with_batch_size(16);
        let (_, history) = train_autoencoder(
            model(), dataset(64, 1), Some(dataset(32, 2)), &config, &Default::default(),
        ).unwrap();

        // Each of the 2 workers gets 32 rows → 2 batches of 16 per worker
        assert_eq!(history.step_losses.len(), 3 * 4);
        assert_eq!(history.train_losses.len(), 3);
        assert_eq!(history.val_losses.as_ref().map(Vec::len), Some(3));
        assert!(history.train_losses.iter().all(|l| l.is_finite()));
    }

    #[test]
    fn test_single_worker_keeps_one_short_batch() {
        // 100 rows, batch 32 → 32, 32, 32, 4
        let config = reproducible_config().with_epochs(1).with_batch_size(32);
        let (_, history) = train_autoencoder(
            model(), dataset(100, 8), None, &config, &Default::default(),
        ).unwrap();
        assert_eq!(history.step_losses.len(), 4);
    }

    #[test]
    fn test_no_validation_curve_without_val_set() {
        let config = quiet_config().with_epochs(2).with_batch_size(32);
        let (_, history) = train_autoencoder(
            model(), dataset(64, 3), None, &config, &Default::default(),
        ).unwrap();
        assert!(history.val_losses.is_none());
        assert_eq!(history.epochs(), 2);
    }

    #[test]
    fn test_training_loss_falls_on_average() {
        let config = reproducible_config()
            .with_epochs(30)
            .with_batch_size(32)
            .with_learning_rate(5e-2);
        let (_, history) = train_autoencoder(
            model(), dataset(256, 4), None, &config, &Default::default(),
        ).unwrap();

        let improvement = history.mean_improvement().unwrap();
        assert!(improvement > 0.0, "losses: {:?}", history.train_losses);
        assert!(history.final_train_loss().unwrap() < history.train_losses[0]);
    }

    #[test]
    fn test_same_seed_same_loss_curve() {
        let config  = reproducible_config().with_epochs(3).with_batch_size(16).with_seed(11);
        let initial = model();

        let (_, first) = train_autoencoder(
            initial.clone(), dataset(96, 9), None, &config, &Default::default(),
        ).unwrap();
        let (_, second) = train_autoencoder(
            initial, dataset(96, 9), None, &config, &Default::default(),
        ).unwrap();

        assert_eq!(first.step_losses, second.step_losses);
        assert_eq!(first.train_losses, second.train_losses);
    }

    #[test]
    fn test_validation_pass_does_not_change_training() {
        let config  = reproducible_config().with_epochs(3).with_batch_size(16).with_seed(5);
        let initial = model();

        let (with_val_model, with_val) = train_autoencoder(
            initial.clone(), dataset(96, 10), Some(dataset(40, 12)), &config, &Default::default(),
        ).unwrap();
        let (without_val_model, without_val) = train_autoencoder(
            initial, dataset(96, 10), None, &config, &Default::default(),
        ).unwrap();

        assert_eq!(with_val.step_losses, without_val.step_losses);
        assert_eq!(with_val.train_losses, without_val.train_losses);
        assert_eq!(with_val.val_losses.as_ref().map(Vec::len), Some(3));

        let weights = |m: &Autoencoder<TestBackend>| {
            m.decoder.layers[1].weight.val().into_data().to_vec::<f32>().unwrap()
        };
        assert_eq!(weights(&with_val_model), weights(&without_val_model));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = quiet_config().with_batch_size(0);
        let err = train_autoencoder(model(), dataset(8, 6), None, &config, &Default::default())
            .unwrap_err();
        assert!(matches!(err, AutoencoderError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_training_set_rejected() {
        let err = train_autoencoder(
            model(), SequenceDataset::new(vec![]), None, &quiet_config(), &Default::default(),
        ).unwrap_err();
        assert!(matches!(err, AutoencoderError::EmptyDataset(_)));
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let val = SequenceDataset::new(vec![Sequence::centred(3, 4)]);
        let err = train_autoencoder(
            model(), dataset(8, 7), Some(val), &quiet_config(), &Default::default(),
        ).unwrap_err();
        assert!(matches!(err, AutoencoderError::ShapeMismatch { expected: 3, found: 4 }));
    }
}
