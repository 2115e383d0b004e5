//! Remote scoring boundary.
//!
//! The trained revenue model lives behind `ScoringService`: one ordered
//! spend vector in, one raw scalar out. The engine never sees model
//! internals, and the predictor owns all unit conversion on both sides of
//! the call.

use crate::{
    config::ModelConfig,
    error::EngineResult,
    types::CHANNEL_COUNT,
};

/// The contract the remote scoring function must fulfill.
///
/// `spend` is positional per `Channel::ALL` and already expressed in the
/// model's input units (the predictor applies the unit multiplier before
/// calling). Failures surface as `PredictionService` errors.
pub trait ScoringService {
    fn score(&self, spend: &[f64; CHANNEL_COUNT]) -> EngineResult<f64>;
}

/// Linear stand-in for the warehouse-hosted model, used by the headless
/// runner. Coefficients come from `data/scoring_model.json`.
pub struct LinearModelScorer {
    coefficients: [f64; CHANNEL_COUNT],
    intercept:    f64,
}

impl LinearModelScorer {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            coefficients: config.coefficients,
            intercept:    config.intercept,
        }
    }
}

impl ScoringService for LinearModelScorer {
    fn score(&self, spend: &[f64; CHANNEL_COUNT]) -> EngineResult<f64> {
        let dot: f64 = spend
            .iter()
            .zip(self.coefficients.iter())
            .map(|(s, c)| s * c)
            .sum();
        Ok(dot + self.intercept)
    }
}
