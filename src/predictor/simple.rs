//! Stateless baseline predictors.

use crate::Outcome;
use crate::predictor::SimplePredictor;

/// A simple predictor with no state: always predict 'taken'.
///
/// This is the engine behind the Static variant, and the baseline that the
/// table-based predictors are measured against.
pub struct TakenPredictor;
impl SimplePredictor for TakenPredictor {
    fn name(&self) -> &'static str { "TakenPredictor" }
    fn predict(&self) -> Outcome { Outcome::T }
}

/// A simple predictor with no state: always predict 'not-taken'.
pub struct NotTakenPredictor;
impl SimplePredictor for NotTakenPredictor {
    fn name(&self) -> &'static str { "NotTakenPredictor" }
    fn predict(&self) -> Outcome { Outcome::N }
}

/// A simple predictor with no state: randomly predict an outcome.
pub struct RandomPredictor;
impl SimplePredictor for RandomPredictor {
    fn name(&self) -> &'static str { "RandomPredictor" }
    fn predict(&self) -> Outcome { rand::random::<bool>().into() }
}
