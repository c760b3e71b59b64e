// Weighted scoring of an indicator bundle and its signal label.
pub mod score_engine;
pub mod signal;

pub use score_engine::{ScoreEngine, WeightSet};
pub use signal::classify;
