//! Types for implementing a table of predictors.

use crate::predictor::counter::*;
use crate::predictor::StatefulPredictor;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, input: Self::Input) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, input: Self::Input) -> &mut Self::Entry;

    /// Returns a mask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A power-of-two table of saturating counters.
///
/// Inputs are raw (possibly hashed) values; masking down to the table size
/// happens here, which makes out-of-range indices structurally impossible.
pub struct CounterTable {
    data: Vec<SaturatingCounter>,
    size: usize,
}
impl CounterTable {
    /// Create a table with `2^index_bits` entries, all initialized to
    /// weakly not-taken.
    pub fn new(index_bits: usize) -> Self {
        let size = 1usize << index_bits;
        Self {
            data: vec![SaturatingCounter::new(); size],
            size,
        }
    }

    /// Reset every counter to its initial state.
    pub fn reset(&mut self) {
        for ctr in self.data.iter_mut() {
            ctr.reset();
        }
    }
}
impl PredictorTable for CounterTable {
    type Input = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.size }

    fn get_index(&self, input: usize) -> usize {
        input & self.index_mask()
    }

    fn get_entry(&self, input: usize) -> &SaturatingCounter {
        &self.data[self.get_index(input)]
    }

    fn get_entry_mut(&mut self, input: usize) -> &mut SaturatingCounter {
        let index = self.get_index(input);
        &mut self.data[index]
    }
}
