//! Helpers for collecting statistics.

use std::collections::*;

use bitvec::prelude::*;
use itertools::*;

use crate::Outcome;

/// Container for recording simple statistics while evaluating a predictor.
pub struct BranchStats {
    /// Per-branch statistics (indexed by program counter value).
    pub data: BTreeMap<u32, BranchData>,

    /// Number of correct predictions
    pub global_hits: usize,

    /// Number of times any branch instruction was executed
    pub global_brns: usize,
}
impl BranchStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            global_hits: 0,
            global_brns: 0,
        }
    }

    /// Record one resolved branch.
    pub fn update(&mut self, pc: u32, prediction: Outcome, outcome: Outcome) {
        let hit = prediction == outcome;
        self.global_brns += 1;
        if hit {
            self.global_hits += 1;
        }
        let data = self.get_mut(pc);
        data.occ += 1;
        data.pat.push(outcome.into());
        if hit {
            data.hits += 1;
        }
    }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u32) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: u32) -> &mut BranchData {
        self.data.entry(pc).or_insert_with(BranchData::new)
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of branches that are always taken.
    pub fn num_always_taken(&self) -> usize {
        self.data.values().filter(|entry| entry.is_always_taken()).count()
    }

    /// Returns the number of branches that are never taken.
    pub fn num_never_taken(&self) -> usize {
        self.data.values().filter(|entry| entry.is_never_taken()).count()
    }

    /// Return the `n` most frequently executed branches.
    pub fn get_common_branches(&self, n: usize) -> Vec<(u32, &BranchData)> {
        self.data.iter()
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}
impl Default for BranchStats {
    fn default() -> Self { Self::new() }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}
impl BranchData {
    pub fn new() -> Self {
        Self {
            occ: 0,
            hits: 0,
            pat: BitVec::new(),
        }
    }

    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }
}
impl Default for BranchData {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_accounting() {
        let mut stats = BranchStats::new();
        stats.update(0x40, Outcome::T, Outcome::T);
        stats.update(0x40, Outcome::T, Outcome::N);
        stats.update(0x80, Outcome::N, Outcome::N);
        assert_eq!(stats.global_brns(), 3);
        assert_eq!(stats.global_hits(), 2);
        assert_eq!(stats.global_miss(), 1);
        assert_eq!(stats.num_unique_branches(), 2);
    }

    #[test]
    fn per_branch_patterns() {
        let mut stats = BranchStats::new();
        stats.update(0x40, Outcome::N, Outcome::T);
        stats.update(0x40, Outcome::T, Outcome::T);
        stats.update(0x80, Outcome::N, Outcome::N);

        let data = stats.get(0x40).unwrap();
        assert_eq!(data.occ, 2);
        assert_eq!(data.hits, 1);
        assert_eq!(data.times_taken(), 2);
        assert!(data.is_always_taken());

        assert_eq!(stats.num_always_taken(), 1);
        assert_eq!(stats.num_never_taken(), 1);
    }

    #[test]
    fn common_branches_are_sorted_by_frequency() {
        let mut stats = BranchStats::new();
        for _ in 0..5 {
            stats.update(0x10, Outcome::T, Outcome::T);
        }
        for _ in 0..2 {
            stats.update(0x20, Outcome::T, Outcome::T);
        }
        let common = stats.get_common_branches(2);
        assert_eq!(common[0].0, 0x10);
        assert_eq!(common[1].0, 0x20);
    }
}
