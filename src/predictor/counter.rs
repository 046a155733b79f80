//! Implementation of a saturating counter.

use crate::Outcome;
use crate::predictor::StatefulPredictor;

/// The four confidence levels of a [`SaturatingCounter`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CounterState {
    StronglyNotTaken = 0,
    WeaklyNotTaken = 1,
    WeaklyTaken = 2,
    StronglyTaken = 3,
}

/// A 2-bit saturating counter used to follow the behavior of a branch.
///
/// A taken outcome increments and a not-taken outcome decrements, with no
/// wraparound at either end. The taken half (value >= 2) predicts taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    value: u8,
}
impl SaturatingCounter {
    const MAX: u8 = CounterState::StronglyTaken as u8;
    const INIT: u8 = CounterState::WeaklyNotTaken as u8;

    pub fn new() -> Self {
        Self { value: Self::INIT }
    }

    /// Return the raw counter value in [0, 3].
    pub fn value(&self) -> u8 { self.value }

    /// Return the named confidence level.
    pub fn state(&self) -> CounterState {
        match self.value {
            0 => CounterState::StronglyNotTaken,
            1 => CounterState::WeaklyNotTaken,
            2 => CounterState::WeaklyTaken,
            _ => CounterState::StronglyTaken,
        }
    }
}
impl Default for SaturatingCounter {
    fn default() -> Self { Self::new() }
}

impl StatefulPredictor for SaturatingCounter {
    fn name(&self) -> &'static str { "SaturatingCounter" }

    fn reset(&mut self) {
        self.value = Self::INIT;
    }

    fn predict(&self) -> Outcome {
        Outcome::from_bool(self.value >= CounterState::WeaklyTaken as u8)
    }

    fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => {
                if self.value < Self::MAX {
                    self.value += 1;
                }
            },
            Outcome::N => {
                self.value = self.value.saturating_sub(1);
            },
        }
    }
}
