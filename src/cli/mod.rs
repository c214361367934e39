// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments, hands a TrainConfig to the use case, and
// prints the resulting loss curves. No computation here.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::TrainArgs;

use crate::application::train_use_case::TrainUseCase;
use crate::domain::loss_history::LossHistory;

#[derive(Parser, Debug)]
#[command(
    name = "seq-autoencoder",
    version,
    about = "Train a fully-connected autoencoder on synthetic integer sequences."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: TrainArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        tracing::info!("Starting training ({} epochs)", self.args.epochs);

        let use_case = TrainUseCase::new(self.args.into());
        let history  = use_case.execute()?;

        println!("{}", render_report(&history));
        Ok(())
    }
}

/// Final curves in the form printed at the end of a run.
fn render_report(history: &LossHistory) -> String {
    let val = history
        .val_losses
        .as_ref()
        .map_or_else(|| "None".to_string(), |v| format!("{v:?}"));
    format!(
        "Final Training Loss: {:?}\nFinal Validation Loss: {}",
        history.train_losses, val
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{DeviceKind, TrainConfig};

    #[test]
    fn test_no_arguments_gives_default_config() {
        let cli = Cli::try_parse_from(["seq-autoencoder"]).unwrap();
        let cfg: TrainConfig = cli.args.into();
        let default = TrainConfig::default();

        assert_eq!(cfg.num_samples, default.num_samples);
        assert_eq!(cfg.encoder_hidden, default.encoder_hidden);
        assert_eq!(cfg.decoder_hidden, default.decoder_hidden);
        assert_eq!(cfg.epochs, default.epochs);
        assert_eq!(cfg.batch_size, default.batch_size);
        assert_eq!(cfg.lr, default.lr);
        assert_eq!(cfg.data_seed, default.data_seed);
        assert_eq!(cfg.device, DeviceKind::Cpu);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "seq-autoencoder",
            "--epochs", "3",
            "--encoder-hidden", "8,4",
            "--device", "gpu",
            "--metrics-dir", "out",
            "--init-from", "ckpt",
        ]).unwrap();
        let cfg: TrainConfig = cli.args.into();

        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.encoder_hidden, vec![8, 4]);
        assert_eq!(cfg.device, DeviceKind::Gpu);
        assert_eq!(cfg.metrics_dir.as_deref(), Some("out"));
        assert_eq!(cfg.init_from.as_deref(), Some("ckpt"));
    }

    #[test]
    fn test_report_format() {
        let mut history = LossHistory::new(false);
        history.record_epoch(2.5, None);
        assert_eq!(
            render_report(&history),
            "Final Training Loss: [2.5]\nFinal Validation Loss: None"
        );
    }
}
