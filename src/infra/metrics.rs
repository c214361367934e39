// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the per-epoch loss curves to a CSV file so they can
// be plotted after the run.
//
// Output file: <dir>/metrics.csv
//
// Example CSV output:
//   epoch,train_loss,val_loss
//   0,31554.218750,31721.007812
//   1,28410.931641,28560.414062
//   ...
//
// val_loss is left empty when training ran without a
// validation set. Each run rewrites the file from scratch.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

use crate::domain::loss_history::LossHistory;

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 0, matching the progress output)
    pub epoch: usize,

    /// Whole-training-set MSE after this epoch
    pub train_loss: f64,

    /// Whole-validation-set MSE after this epoch, if tracked
    pub val_loss: Option<f64>,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: Option<f64>) -> Self {
        Self { epoch, train_loss, val_loss }
    }

    /// One metrics row per recorded epoch of `history`.
    pub fn from_history(history: &LossHistory) -> Vec<Self> {
        history
            .train_losses
            .iter()
            .enumerate()
            .map(|(epoch, &train_loss)| {
                let val_loss = history
                    .val_losses
                    .as_ref()
                    .and_then(|v| v.get(epoch).copied());
                Self::new(epoch, train_loss, val_loss)
            })
            .collect()
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger for one run.
    /// Any metrics.csv left in `dir` by an earlier run is replaced.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // File::create truncates, so rows from a previous run never mix in
        let mut f = fs::File::create(&csv_path)?;
        writeln!(f, "epoch,train_loss,val_loss")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        let val = m.val_loss.map(|v| format!("{v:.6}")).unwrap_or_default();
        writeln!(f, "{},{:.6},{}", m.epoch, m.train_loss, val)?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}",
            m.epoch,
            m.train_loss,
        );

        Ok(())
    }

    /// Append every epoch of a finished run.
    pub fn log_history(&self, history: &LossHistory) -> Result<()> {
        for m in EpochMetrics::from_history(history) {
            self.log(&m)?;
        }
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_history_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();

        let mut history = LossHistory::new(true);
        history.record_epoch(4.0, Some(5.0));
        history.record_epoch(2.0, Some(3.0));
        logger.log_history(&history).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(
            csv,
            "epoch,train_loss,val_loss\n0,4.000000,5.000000\n1,2.000000,3.000000\n"
        );
    }

    #[test]
    fn test_missing_val_loss_is_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(0, 1.5, None)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert!(csv.ends_with("0,1.500000,\n"));
    }

    #[test]
    fn test_new_run_replaces_previous_rows() {
        let dir = tempfile::tempdir().unwrap();

        let first = MetricsLogger::new(dir.path()).unwrap();
        first.log(&EpochMetrics::new(0, 9.0, None)).unwrap();

        let second = MetricsLogger::new(dir.path()).unwrap();
        second.log(&EpochMetrics::new(0, 1.0, None)).unwrap();

        let csv = fs::read_to_string(second.csv_path()).unwrap();
        assert_eq!(csv, "epoch,train_loss,val_loss\n0,1.000000,\n");
    }
}
