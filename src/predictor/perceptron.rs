//! Implementation of a perceptron predictor.
//!
//! See the following papers:
//!
//! - "Dynamic Branch Prediction with Perceptrons" (Jiménez and Lin, 2001)
//! - "Neural Methods for Dynamic Branch Prediction" (Jiménez and Lin, 2002)

use crate::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::PredictorTable;

/// Weights are clipped to this magnitude instead of wrapping.
pub const WEIGHT_LIMIT: i16 = 128;

fn clip(val: i32) -> i16 {
    val.clamp(-(WEIGHT_LIMIT as i32), WEIGHT_LIMIT as i32) as i16
}

/// A perceptron [with integer weights]: one weight per global history bit
/// position, plus a bias.
pub struct Perceptron {
    pub weights: Vec<i16>,
    pub bias: i16,
}
impl Perceptron {
    pub fn new(len: usize) -> Self {
        Self {
            weights: vec![0; len],
            bias: 0,
        }
    }

    /// Reset the state.
    pub fn reset(&mut self) {
        self.bias = 0;
        self.weights.fill(0);
    }

    /// Convert from an [Outcome] into a bipolar target.
    fn outcome_to_val(outcome: Outcome) -> i32 {
        match outcome {
            Outcome::T => 1,
            Outcome::N => -1,
        }
    }

    /// Dot the weights with the bipolar encoding of the history bits and
    /// add the bias. The predicted outcome is determined by the sign of
    /// the output.
    pub fn output(&self, history: usize) -> i32 {
        let mut res = self.bias as i32;
        for (idx, w) in self.weights.iter().enumerate() {
            if (history >> idx) & 1 != 0 {
                res += *w as i32;
            } else {
                res -= *w as i32;
            }
        }
        res
    }

    /// Given some outcome, adjust the weights.
    ///
    /// When a bit in the history matches the outcome, increment the
    /// corresponding weight. Otherwise, decrement the corresponding weight.
    /// The bias always moves toward the outcome. Every observed outcome
    /// trains the weights; no confidence threshold is applied.
    pub fn train(&mut self, history: usize, outcome: Outcome) {
        let target = Self::outcome_to_val(outcome);
        self.bias = clip(self.bias as i32 + target);
        for (idx, w) in self.weights.iter_mut().enumerate() {
            let bit: i32 = if (history >> idx) & 1 != 0 { 1 } else { -1 };
            *w = clip(*w as i32 + target * bit);
        }
    }
}

/// A table of perceptrons indexed by the low bits of the program counter,
/// all reading the shared global history register.
///
/// Linear separability over the history bits captures longer-range
/// correlations than a counter table of comparable storage, at the cost of
/// one multiply-free dot product per prediction.
pub struct PerceptronPredictor {
    data: Vec<Perceptron>,
    size: usize,
}
impl PerceptronPredictor {
    /// Create `2^pc_index_bits` perceptrons of `ghistory_bits` weights
    /// (plus bias) each, all zeroed.
    pub fn new(ghistory_bits: usize, pc_index_bits: usize) -> Self {
        let size = 1usize << pc_index_bits;
        let data = (0..size).map(|_| Perceptron::new(ghistory_bits)).collect();
        Self { data, size }
    }

    /// Return the predicted direction for the branch at `pc`.
    /// Strictly positive output means taken.
    pub fn predict(&self, pc: u32, ghr: &HistoryRegister) -> Outcome {
        Outcome::from_bool(self.get_entry(pc).output(ghr.value()) > 0)
    }

    /// Train the perceptron for this branch against the pre-update history.
    pub fn update(&mut self, pc: u32, ghr: &HistoryRegister, outcome: Outcome) {
        let history = ghr.value();
        self.get_entry_mut(pc).train(history, outcome);
    }

    /// Zero every weight vector.
    pub fn reset(&mut self) {
        for row in self.data.iter_mut() {
            row.reset();
        }
    }
}
impl PredictorTable for PerceptronPredictor {
    type Input = u32;
    type Entry = Perceptron;

    fn size(&self) -> usize { self.size }

    fn get_index(&self, pc: u32) -> usize {
        pc as usize & self.index_mask()
    }

    fn get_entry(&self, pc: u32) -> &Perceptron {
        &self.data[self.get_index(pc)]
    }

    fn get_entry_mut(&mut self, pc: u32) -> &mut Perceptron {
        let index = self.get_index(pc);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredictorConfig;

    // With all weights zero the output is exactly zero, which is not
    // strictly positive: the first prediction is always not-taken.
    #[test]
    fn zeroed_weights_predict_not_taken() {
        let ghr = HistoryRegister::new(2);
        let p = PerceptronPredictor::new(2, 1);
        assert_eq!(p.predict(0, &ghr), Outcome::N);
    }

    // Training taken under history bits (0, 0): the bias moves to +1, and
    // both history bits disagree with the outcome, so both weights move
    // to -1.
    #[test]
    fn bipolar_update_under_zero_history() {
        let ghr = HistoryRegister::new(2);
        let mut p = PerceptronPredictor::new(2, 1);

        p.update(0, &ghr, Outcome::T);
        let row = p.get_entry(0);
        assert_eq!(row.bias, 1);
        assert_eq!(row.weights, vec![-1, -1]);

        // Output under the same history: 1 - (-1) - (-1) = 3
        assert_eq!(row.output(0), 3);
        assert_eq!(p.predict(0, &ghr), Outcome::T);
    }

    #[test]
    fn history_bits_weigh_in_with_their_sign() {
        let mut row = Perceptron::new(2);
        // Repeated "taken when bit 0 was set" training
        for _ in 0..4 {
            row.train(0b01, Outcome::T);
        }
        assert_eq!(row.weights[0], 4);
        assert_eq!(row.weights[1], -4);
        assert!(row.output(0b01) > 0);
        assert!(row.output(0b10) < 0);
    }

    #[test]
    fn weights_never_exceed_the_clip_limit() {
        let mut row = Perceptron::new(4);
        for _ in 0..1000 {
            row.train(0b1111, Outcome::T);
        }
        for _ in 0..2500 {
            row.train(0b0000, Outcome::N);
        }
        assert!(row.bias.abs() <= WEIGHT_LIMIT);
        for w in row.weights.iter() {
            assert!(w.abs() <= WEIGHT_LIMIT);
        }
    }

    #[test]
    fn learns_a_history_correlated_branch() {
        let mut p = PredictorConfig::perceptron(4, 2).build().unwrap();
        let mut hits = 0;
        let mut total = 0;
        // Outcome equals the outcome four branches ago
        let stream: Vec<bool> =
            (0..400).map(|i| matches!(i % 4, 0 | 1)).collect();
        for (i, &taken) in stream.iter().enumerate() {
            let outcome = Outcome::from_bool(taken);
            if i >= 100 {
                total += 1;
                if p.predict(0x40) == outcome {
                    hits += 1;
                }
            }
            p.train(0x40, outcome);
        }
        assert!(hits as f64 / total as f64 > 0.95);
    }
}
