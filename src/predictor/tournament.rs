//! Implementation of a tournament (hybrid global/local) predictor.

use crate::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::*;

/// A meta-predictor arbitrating between a [`Gshare`] and a [`Local`]
/// component.
///
/// The choice table is indexed by the masked global history value, the same
/// index space (and masking discipline) as the register that drives it. A
/// choice counter in the taken half means "trust the global side".
pub struct Tournament {
    /// Global-history component
    pub gshare: Gshare,

    /// Per-address component
    pub local: Local,

    /// Arbiter counters, one per global history pattern
    pub choice: CounterTable,
}
impl Tournament {
    pub fn new(
        ghistory_bits: usize,
        lhistory_bits: usize,
        pc_index_bits: usize,
    ) -> Self {
        Self {
            gshare: Gshare::new(ghistory_bits),
            local: Local::new(pc_index_bits, lhistory_bits),
            choice: CounterTable::new(ghistory_bits),
        }
    }

    /// Return the prediction of whichever component the arbiter currently
    /// trusts for this history pattern.
    pub fn predict(&self, pc: u32, ghr: &HistoryRegister) -> Outcome {
        let global = self.gshare.predict(pc, ghr);
        let local = self.local.predict(pc);
        match self.choice.get_entry(ghr.value()).predict() {
            Outcome::T => global,
            Outcome::N => local,
        }
    }

    /// Resolve a branch: teach the arbiter, then train both components.
    ///
    /// Both sub-predictions are recomputed from pre-update state first. The
    /// arbiter only learns when the components disagree; it moves toward
    /// whichever one matched the real outcome.
    pub fn update(&mut self, pc: u32, ghr: &HistoryRegister, outcome: Outcome) {
        let global = self.gshare.predict(pc, ghr);
        let local = self.local.predict(pc);

        if global != local {
            let toward = Outcome::from_bool(global == outcome);
            self.choice.get_entry_mut(ghr.value()).update(toward);
        }

        self.gshare.update(pc, ghr, outcome);
        self.local.update(pc, outcome);
    }

    /// Reset both components and the arbiter.
    pub fn reset(&mut self) {
        self.gshare.reset();
        self.local.reset();
        self.choice.reset();
    }
}
