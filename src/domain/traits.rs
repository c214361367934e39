// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer asks a SequenceSource for data and
// never cares where it came from.
//
// Implementations:
//   - SyntheticGenerator → seeded random integer runs
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::sequence::Sequence;

// ─── SequenceSource ───────────────────────────────────────────────────────────
/// Any component that can produce a set of equal-width sequences.
pub trait SequenceSource {
    /// Produce every sample this source holds.
    fn sequences(&self) -> Vec<Sequence>;

    /// Feature width shared by every produced sample.
    fn width(&self) -> usize;
}
