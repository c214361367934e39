// ============================================================
// Typed Errors
// ============================================================
// Errors raised by the data and ML layers before any tensor
// work starts. The application and CLI layers wrap these in
// anyhow::Error with extra context.
//
// Burn itself panics on shape errors inside a kernel, so
// train_autoencoder checks configuration and sample widths
// up front and reports them through this enum instead.

use thiserror::Error;

/// Errors that can occur while configuring or training the autoencoder.
#[derive(Debug, Error)]
pub enum AutoencoderError {
    /// A configuration value is out of range (zero sizes, etc.).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A dataset that must contain samples is empty.
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    /// A sample's feature width does not match the model's input dimension.
    #[error("shape mismatch: expected feature width {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
}

impl AutoencoderError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    pub fn empty_dataset(name: impl Into<String>) -> Self {
        Self::EmptyDataset(name.into())
    }
}

/// Result type for the data and ML layers.
pub type Result<T> = std::result::Result<T, AutoencoderError>;
