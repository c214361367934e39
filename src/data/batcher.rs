// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<Sequence>
// into one float tensor on the target device.
//
//   Input:  N sequences, each of width W
//   Output: SequenceBatch with values of shape [N, W]
//
// All rows are flattened into one Vec<f32> in row-major order
// and handed to Burn together with the [N, W] shape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::sequence::Sequence;

// ─── SequenceBatch ────────────────────────────────────────────────────────────
/// A mini-batch ready for the autoencoder forward pass.
/// The autoencoder's target is its own input, so one tensor is enough.
#[derive(Debug, Clone)]
pub struct SequenceBatch<B: Backend> {
    /// shape: [batch_size, width]
    pub values: Tensor<B, 2>,
}

// ─── SequenceBatcher ──────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct SequenceBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SequenceBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack a borrowed slice without going through the DataLoader.
    /// Used for whole-dataset evaluation tensors.
    pub fn stack(&self, items: &[Sequence]) -> Tensor<B, 2> {
        let rows  = items.len();
        let width = items.first().map_or(0, Sequence::width);

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .collect();

        Tensor::<B, 2>::from_data(TensorData::new(flat, [rows, width]), &self.device)
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// The DataLoader worker threads call .batch(items) for every mini-batch.
impl<B: Backend> Batcher<Sequence, SequenceBatch<B>> for SequenceBatcher<B> {
    fn batch(&self, items: Vec<Sequence>) -> SequenceBatch<B> {
        SequenceBatch { values: self.stack(&items) }
    }
}
