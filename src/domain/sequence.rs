// ============================================================
// Layer 3 — Sequence Domain Type
// ============================================================
// One training example: a short run of consecutive integers
// stored as f32 so it can be fed straight into a float tensor.
//
// Example (width 3, anchor 41):
//   [40.0, 41.0, 42.0]

use serde::{Deserialize, Serialize};

/// A fixed-width numeric example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    /// Feature values, one per input dimension
    pub values: Vec<f32>,
}

impl Sequence {
    /// Build the consecutive run centred on `anchor`.
    ///
    /// Offsets start at `-(width - 1) / 2` and increase by one,
    /// so width 3 gives `anchor - 1, anchor, anchor + 1`.
    pub fn centred(anchor: i64, width: usize) -> Self {
        let first = anchor - (width.saturating_sub(1) / 2) as i64;
        let values = (0..width as i64).map(|i| (first + i) as f32).collect();
        Self { values }
    }

    /// Number of features in this example
    pub fn width(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_width_three() {
        let s = Sequence::centred(41, 3);
        assert_eq!(s.values, vec![40.0, 41.0, 42.0]);
        assert_eq!(s.width(), 3);
    }

    #[test]
    fn test_centred_even_width_leans_right() {
        let s = Sequence::centred(10, 4);
        assert_eq!(s.values, vec![9.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_centred_zero_anchor_goes_negative() {
        let s = Sequence::centred(0, 3);
        assert_eq!(s.values, vec![-1.0, 0.0, 1.0]);
    }
}
