
use bitvec::prelude::*;

/// A shift register tracking the most recent branch outcomes.
///
/// The newest outcome always lives in bit 0, and only the low `len` bits are
/// ever significant. `len` must not exceed the width of [usize].
pub struct HistoryRegister {
    pub data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn data(&self) -> &BitVec { &self.data }

    /// Return the register contents as a [usize].
    /// A zero-length register always reads as zero.
    pub fn value(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.data.load::<usize>()
    }

    /// Shift a new outcome into bit 0, discarding the oldest bit.
    ///
    /// This must occur exactly once per resolved branch, strictly after
    /// every consumer of the pre-update value has read it.
    pub fn shift_in(&mut self, outcome: crate::Outcome) {
        match self.len {
            0 => {},
            1 => self.data.set(0, outcome.into()),
            _ => {
                self.data.shift_right(1);
                self.data.set(0, outcome.into());
            },
        }
    }

    /// Clear the register back to all-zeroes.
    pub fn reset(&mut self) {
        self.data.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    #[test]
    fn newest_outcome_in_low_bit() {
        let mut ghr = HistoryRegister::new(4);
        assert_eq!(ghr.value(), 0b0000);
        ghr.shift_in(Outcome::T);
        assert_eq!(ghr.value(), 0b0001);
        ghr.shift_in(Outcome::N);
        assert_eq!(ghr.value(), 0b0010);
        ghr.shift_in(Outcome::T);
        assert_eq!(ghr.value(), 0b0101);
    }

    #[test]
    fn oldest_outcomes_fall_off() {
        let mut ghr = HistoryRegister::new(2);
        for _ in 0..8 {
            ghr.shift_in(Outcome::T);
        }
        // Only the low two bits are ever significant
        assert_eq!(ghr.value(), 0b11);
        ghr.shift_in(Outcome::N);
        assert_eq!(ghr.value(), 0b10);
    }

    #[test]
    fn single_bit_register() {
        let mut ghr = HistoryRegister::new(1);
        ghr.shift_in(Outcome::T);
        assert_eq!(ghr.value(), 1);
        ghr.shift_in(Outcome::N);
        assert_eq!(ghr.value(), 0);
    }

    #[test]
    fn zero_length_register_reads_zero() {
        let mut ghr = HistoryRegister::new(0);
        ghr.shift_in(Outcome::T);
        assert_eq!(ghr.value(), 0);
    }

    #[test]
    fn reset_clears_all_bits() {
        let mut ghr = HistoryRegister::new(8);
        for _ in 0..8 {
            ghr.shift_in(Outcome::T);
        }
        ghr.reset();
        assert_eq!(ghr.value(), 0);
    }
}
