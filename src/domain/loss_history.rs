// ============================================================
// Layer 3 — Loss History
// ============================================================
// The curves produced by one training run, already copied
// back to host memory as f64:
//
//   step_losses  — mini-batch MSE after every optimiser step
//   train_losses — whole-training-set MSE after every epoch
//   val_losses   — whole-validation-set MSE after every epoch
//                  (None when no validation set was given)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    pub step_losses:  Vec<f64>,
    pub train_losses: Vec<f64>,
    pub val_losses:   Option<Vec<f64>>,
}

impl LossHistory {
    /// Empty history; `track_validation` decides whether a
    /// validation curve is recorded.
    pub fn new(track_validation: bool) -> Self {
        Self {
            step_losses:  Vec::new(),
            train_losses: Vec::new(),
            val_losses:   track_validation.then(Vec::new),
        }
    }

    pub fn record_step(&mut self, loss: f64) {
        self.step_losses.push(loss);
    }

    /// Append one epoch's whole-dataset losses.
    /// `val_loss` is dropped if no validation curve is tracked.
    pub fn record_epoch(&mut self, train_loss: f64, val_loss: Option<f64>) {
        self.train_losses.push(train_loss);
        if let (Some(curve), Some(v)) = (self.val_losses.as_mut(), val_loss) {
            curve.push(v);
        }
    }

    /// Number of completed epochs
    pub fn epochs(&self) -> usize {
        self.train_losses.len()
    }

    pub fn final_train_loss(&self) -> Option<f64> {
        self.train_losses.last().copied()
    }

    pub fn final_val_loss(&self) -> Option<f64> {
        self.val_losses.as_ref().and_then(|v| v.last().copied())
    }

    /// Index of the epoch with the lowest validation loss.
    pub fn best_val_epoch(&self) -> Option<usize> {
        self.val_losses.as_ref()?
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    /// Mean of the first half of the training curve minus the mean
    /// of the second half. Positive when loss is falling on average.
    /// Returns None with fewer than two epochs.
    pub fn mean_improvement(&self) -> Option<f64> {
        let n = self.train_losses.len();
        if n < 2 {
            return None;
        }
        let (early, late) = self.train_losses.split_at(n / 2);
        let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
        Some(mean(early) - mean(late))
    }
}
