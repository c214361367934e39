// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits for the concepts the rest of
// the program passes around: a single integer sequence, the
// recorded loss curves, and the source that produces data.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One example row of the dataset
pub mod sequence;

// Per-step and per-epoch MSE curves returned by training
pub mod loss_history;

// Core abstractions (traits) that other layers implement
pub mod traits;
