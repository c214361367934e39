// ============================================================
// Layer 4 — Synthetic Sequence Generator
// ============================================================
// Draws `num_samples` anchors uniformly from [0, max_value)
// and expands each into a run of `width` consecutive integers
// centred on the anchor:
//
//   anchor 7, width 3  →  [6, 7, 8]
//
// The autoencoder has to squeeze each run through a small
// latent space (one number by default) and rebuild it, which
// it can do perfectly in principle since the run is fully
// determined by its anchor.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::{sequence::Sequence, traits::SequenceSource};
use crate::error::{AutoencoderError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticConfig {
    pub num_samples: usize,
    /// Exclusive upper bound for anchors
    pub max_value:   u32,
    pub width:       usize,
    pub seed:        u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            num_samples: 10_000,
            max_value:   10_000,
            width:       3,
            seed:        2021,
        }
    }
}

impl SyntheticConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_value == 0 {
            return Err(AutoencoderError::invalid_config("max_value must be > 0"));
        }
        if self.width == 0 {
            return Err(AutoencoderError::invalid_config("width must be > 0"));
        }
        Ok(())
    }
}

/// Deterministic source of synthetic sequences.
/// Two generators built from the same config produce identical data.
pub struct SyntheticGenerator {
    config: SyntheticConfig,
}

impl SyntheticGenerator {
    pub fn new(config: SyntheticConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl SequenceSource for SyntheticGenerator {
    fn sequences(&self) -> Vec<Sequence> {
        let cfg     = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        let samples: Vec<Sequence> = (0..cfg.num_samples)
            .map(|_| {
                let anchor = rng.gen_range(0..cfg.max_value) as i64;
                Sequence::centred(anchor, cfg.width)
            })
            .collect();

        tracing::debug!(
            "Generated {} sequences (width={}, max_value={}, seed={})",
            samples.len(), cfg.width, cfg.max_value, cfg.seed,
        );
        samples
    }

    fn width(&self) -> usize {
        self.config.width
    }
}
