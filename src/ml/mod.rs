// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All model and optimiser code lives here.
//
//   model.rs   — Encoder and decoder MLPs (Linear + ReLU)
//                and the flatten → encode → decode → reshape
//                forward pass
//
//   trainer.rs — The training loop: shuffled mini-batches,
//                Adam updates, whole-dataset MSE per epoch
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Fully-connected autoencoder architecture
pub mod model;

/// Training loop with per-epoch train/validation evaluation
pub mod trainer;
