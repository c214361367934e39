use burn::data::dataset::Dataset;

use crate::domain::sequence::Sequence;

/// In-memory collection of equal-width sequences.
pub struct SequenceDataset {
    samples: Vec<Sequence>,
}

impl SequenceDataset {
    pub fn new(samples: Vec<Sequence>) -> Self { Self { samples } }

    pub fn samples(&self) -> &[Sequence] { &self.samples }

    /// First sample whose width differs from `expected`, if any.
    pub fn find_width_mismatch(&self, expected: usize) -> Option<usize> {
        self.samples
            .iter()
            .map(Sequence::width)
            .find(|&w| w != expected)
    }
}

impl Dataset<Sequence> for SequenceDataset {
    fn get(&self, index: usize) -> Option<Sequence> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
