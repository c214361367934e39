// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Optional outputs of a training run. Nothing here is touched
// unless the matching CLI flag is given; a default run reads
// and writes no files.
//
//   metrics.rs    — Per-epoch train/validation MSE as CSV
//                   (--metrics-dir)
//
//   checkpoint.rs — Trained weights via Burn's CompactRecorder
//                   plus TrainConfig and LossHistory as JSON
//                   (--checkpoint-dir)
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
