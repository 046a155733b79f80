
pub mod branch;
pub mod config;
pub mod history;
pub mod predictor;
pub mod stats;

pub use branch::*;
pub use config::*;
pub use history::*;
pub use predictor::*;
