//! Implementations of different branch predictors.

pub mod table;
pub mod simple;
pub mod counter;
pub mod gshare;
pub mod local;
pub mod tournament;
pub mod perceptron;

pub use table::*;
pub use simple::*;
pub use counter::*;
pub use gshare::*;
pub use local::*;
pub use tournament::*;
pub use perceptron::*;

use crate::config::*;
use crate::history::*;
use crate::Outcome;

/// Interface to a "trivial" predictor that guesses an outcome without
/// accepting feedback from the rest of the machine.
pub trait SimplePredictor {
    fn name(&self) -> &'static str;
    fn predict(&self) -> Outcome;
}

/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait StatefulPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the current predicted outcome.
    fn predict(&self) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, outcome: Outcome);
}

/// Variant-specific predictor state, selected once at configuration time.
enum Variant {
    Static(TakenPredictor),
    Gshare(Gshare),
    Tournament(Tournament),
    Perceptron(PerceptronPredictor),
}

/// A configured branch-direction predictor.
///
/// This is the boundary presented to the simulation harness: `predict` is
/// called once per branch before resolution, and `train` once after. The
/// global history register is owned here and shifted only at the end of
/// `train`, so prediction and training for one branch always observe the
/// same pre-update history.
pub struct BranchPredictor {
    cfg: PredictorConfig,

    /// Global history shared by every table-based variant
    ghr: HistoryRegister,

    variant: Variant,
}
impl BranchPredictor {
    /// Validate the configuration and allocate all tables.
    pub fn new(cfg: PredictorConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let variant = match cfg.kind {
            PredictorKind::Static => Variant::Static(TakenPredictor),
            PredictorKind::Gshare => {
                Variant::Gshare(Gshare::new(cfg.ghistory_bits))
            },
            PredictorKind::Tournament => Variant::Tournament(Tournament::new(
                cfg.ghistory_bits,
                cfg.lhistory_bits,
                cfg.pc_index_bits,
            )),
            PredictorKind::Perceptron => {
                Variant::Perceptron(PerceptronPredictor::new(
                    cfg.ghistory_bits,
                    cfg.pc_index_bits,
                ))
            },
        };
        // Static consumes no history; size the register to zero so shifts
        // are no-ops.
        let ghr_len = match cfg.kind {
            PredictorKind::Static => 0,
            _ => cfg.ghistory_bits,
        };
        Ok(Self {
            cfg,
            ghr: HistoryRegister::new(ghr_len),
            variant,
        })
    }

    /// Return the configuration used to create this object.
    pub fn config(&self) -> &PredictorConfig { &self.cfg }

    pub fn name(&self) -> &'static str { self.cfg.kind.name() }

    /// Return the global history register.
    pub fn global_history(&self) -> &HistoryRegister { &self.ghr }

    /// Return the predicted direction for the branch at `pc`.
    ///
    /// This never mutates predictor state.
    pub fn predict(&self, pc: u32) -> Outcome {
        match &self.variant {
            Variant::Static(p) => p.predict(),
            Variant::Gshare(p) => p.predict(pc, &self.ghr),
            Variant::Tournament(p) => p.predict(pc, &self.ghr),
            Variant::Perceptron(p) => p.predict(pc, &self.ghr),
        }
    }

    /// Resolve the branch at `pc` with its real outcome.
    ///
    /// Every table is trained against the pre-update global history; the
    /// history register itself shifts last.
    pub fn train(&mut self, pc: u32, outcome: Outcome) {
        match &mut self.variant {
            Variant::Static(_) => {},
            Variant::Gshare(p) => p.update(pc, &self.ghr, outcome),
            Variant::Tournament(p) => p.update(pc, &self.ghr, outcome),
            Variant::Perceptron(p) => p.update(pc, &self.ghr, outcome),
        }
        self.ghr.shift_in(outcome);
    }

    /// Restore every table and register to its initial state, as if the
    /// predictor had just been built from its configuration.
    pub fn reset(&mut self) {
        self.ghr.reset();
        match &mut self.variant {
            Variant::Static(_) => {},
            Variant::Gshare(p) => p.reset(),
            Variant::Tournament(p) => p.reset(),
            Variant::Perceptron(p) => p.reset(),
        }
    }
}
