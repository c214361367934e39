// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores a trained autoencoder using Burn's
// CompactRecorder.
//
// File layout:
//   <dir>/
//     model.mpk.gz        ← trained weights (half precision, gzip)
//     train_config.json   ← architecture + hyperparameters
//     loss_history.json   ← step / epoch loss curves
//
// The config is needed to rebuild a model of the right shape
// before the weights can be loaded into it (--init-from).
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::application::train_use_case::TrainConfig;
use crate::domain::loss_history::LossHistory;
use crate::ml::model::Autoencoder;

const MODEL_FILE:   &str = "model";
const CONFIG_FILE:  &str = "train_config.json";
const HISTORY_FILE: &str = "loss_history.json";

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Save model weights. The recorder appends the `.mpk.gz` extension.
    pub fn save_model<B: Backend>(&self, model: &Autoencoder<B>) -> Result<()> {
        let path = self.dir.join(MODEL_FILE);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        tracing::debug!("Saved model weights to '{}'", path.display());
        Ok(())
    }

    /// Load saved weights into `model`, which must have the same architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  Autoencoder<B>,
        device: &B::Device,
    ) -> Result<Autoencoder<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Has a model been trained?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        self.read_json(CONFIG_FILE)
    }

    pub fn save_history(&self, history: &LossHistory) -> Result<()> {
        self.write_json(HISTORY_FILE, history)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed JSON in '{}'", path.display()))
    }
}
