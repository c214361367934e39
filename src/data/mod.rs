// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the random generator to batched tensors.
//
//   SyntheticGenerator → seeded runs of consecutive integers
//       │
//       ▼
//   split_train_val    → shuffle, then 80/20 train/validation
//       │
//       ▼
//   SequenceDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   SequenceBatcher    → stacks samples into [n, width] tensors
//       │
//       ▼
//   DataLoader         → shuffled mini-batches, 2 worker threads
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Seeded synthetic integer-sequence generator
pub mod generator;

/// Implements Burn's Dataset trait for sequences
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
