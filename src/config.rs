//! Predictor configuration and validation.

use thiserror::Error;

use crate::predictor::BranchPredictor;

/// The widest table index supported by any predictor, in bits.
pub const MAX_INDEX_BITS: usize = 26;

/// The selectable predictor variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PredictorKind {
    /// Always predict "taken"
    Static,
    /// Global history XOR'ed with the program counter
    Gshare,
    /// Hybrid global/local with a learned arbiter
    Tournament,
    /// Per-address perceptrons over global history
    Perceptron,
}
impl PredictorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Gshare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Perceptron => "Perceptron",
        }
    }
}
impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration errors reported when building a [`BranchPredictor`].
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} requires a nonzero global history width")]
    MissingGlobalHistory(PredictorKind),

    #[error("{0} requires a nonzero local history width")]
    MissingLocalHistory(PredictorKind),

    #[error("{0} requires a nonzero PC index width")]
    MissingPcIndex(PredictorKind),

    #[error("table index width {got} exceeds the supported maximum {max}")]
    IndexWidthOverflow { got: usize, max: usize },
}

/// Configuration for building a [`BranchPredictor`].
///
/// Widths not consumed by the selected variant are ignored (a [Static]
/// predictor carries no tables at all).
///
/// [Static]: PredictorKind::Static
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictorConfig {
    /// The selected predictor variant
    pub kind: PredictorKind,

    /// Number of global history bits
    pub ghistory_bits: usize,

    /// Number of local history bits per branch
    pub lhistory_bits: usize,

    /// Number of low PC bits used to select a table entry
    pub pc_index_bits: usize,
}
impl PredictorConfig {
    /// Configuration for the always-taken baseline.
    pub fn static_taken() -> Self {
        Self {
            kind: PredictorKind::Static,
            ghistory_bits: 0,
            lhistory_bits: 0,
            pc_index_bits: 0,
        }
    }

    /// Configuration for a gshare predictor with a `2^ghistory_bits` entry
    /// pattern history table.
    pub fn gshare(ghistory_bits: usize) -> Self {
        Self {
            kind: PredictorKind::Gshare,
            ghistory_bits,
            lhistory_bits: 0,
            pc_index_bits: 0,
        }
    }

    /// Configuration for a tournament predictor combining gshare and
    /// per-address components.
    pub fn tournament(
        ghistory_bits: usize,
        lhistory_bits: usize,
        pc_index_bits: usize,
    ) -> Self {
        Self {
            kind: PredictorKind::Tournament,
            ghistory_bits,
            lhistory_bits,
            pc_index_bits,
        }
    }

    /// Configuration for a perceptron predictor with `2^pc_index_bits`
    /// weight vectors of `ghistory_bits + 1` weights each.
    pub fn perceptron(ghistory_bits: usize, pc_index_bits: usize) -> Self {
        Self {
            kind: PredictorKind::Perceptron,
            ghistory_bits,
            lhistory_bits: 0,
            pc_index_bits,
        }
    }

    /// Check that every width the selected variant depends on is present
    /// and representable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for bits in [self.ghistory_bits, self.lhistory_bits, self.pc_index_bits] {
            if bits > MAX_INDEX_BITS {
                return Err(ConfigError::IndexWidthOverflow {
                    got: bits,
                    max: MAX_INDEX_BITS,
                });
            }
        }
        match self.kind {
            PredictorKind::Static => {},
            PredictorKind::Gshare => {
                if self.ghistory_bits == 0 {
                    return Err(ConfigError::MissingGlobalHistory(self.kind));
                }
            },
            PredictorKind::Tournament => {
                if self.ghistory_bits == 0 {
                    return Err(ConfigError::MissingGlobalHistory(self.kind));
                }
                if self.lhistory_bits == 0 {
                    return Err(ConfigError::MissingLocalHistory(self.kind));
                }
                if self.pc_index_bits == 0 {
                    return Err(ConfigError::MissingPcIndex(self.kind));
                }
            },
            PredictorKind::Perceptron => {
                if self.ghistory_bits == 0 {
                    return Err(ConfigError::MissingGlobalHistory(self.kind));
                }
                if self.pc_index_bits == 0 {
                    return Err(ConfigError::MissingPcIndex(self.kind));
                }
            },
        }
        Ok(())
    }

    /// Estimate the number of state bits this configuration allocates.
    pub fn storage_bits(&self) -> usize {
        let g = self.ghistory_bits;
        let l = self.lhistory_bits;
        let k = self.pc_index_bits;
        match self.kind {
            PredictorKind::Static => 0,
            // 2-bit counters plus the history register itself
            PredictorKind::Gshare => (2 << g) + g,
            PredictorKind::Tournament => {
                let gshare = 2 << g;
                let local = ((1 << k) * l) + (2 << l);
                let choice = 2 << g;
                gshare + local + choice + g
            },
            // Weights in [-128, 128] take nine bits each
            PredictorKind::Perceptron => ((1 << k) * (g + 1) * 9) + g,
        }
    }

    /// Validate this configuration and build the predictor it describes.
    pub fn build(self) -> Result<BranchPredictor, ConfigError> {
        BranchPredictor::new(self)
    }
}
