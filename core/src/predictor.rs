//! Scenario predictor — turns a budget vector into a predicted outcome and
//! a period-over-period change via one remote scoring call.

use crate::{
    error::{EngineError, EngineResult},
    scoring::ScoringService,
    types::{Budgets, ScenarioResult, CHANNEL_COUNT},
};
use std::collections::HashMap;

/// Budgets are scaled by this before the scoring call. Part of the scoring
/// service's input-unit contract: changing it silently corrupts every
/// prediction.
pub const SPEND_UNIT_MULTIPLIER: f64 = 1_000.0;

/// The raw scoring response is divided by this to reach display units
/// (millions). Same compatibility contract as `SPEND_UNIT_MULTIPLIER`.
pub const OUTCOME_DISPLAY_DIVISOR: f64 = 100_000.0;

pub struct ScenarioPredictor {
    scorer: Box<dyn ScoringService>,
    // Memo keyed by the exact (order-sensitive) budget tuple. Results embed
    // the percent-change baseline, so a commit must clear this.
    memo: HashMap<Budgets, ScenarioResult>,
}

impl ScenarioPredictor {
    pub fn new(scorer: Box<dyn ScoringService>) -> Self {
        Self {
            scorer,
            memo: HashMap::new(),
        }
    }

    /// Score one scenario. At most one underlying scoring call per distinct
    /// budget tuple per session.
    ///
    /// Budgets outside [0, 100] are a caller contract violation — the
    /// session clamps slider input before it gets here.
    pub fn predict(
        &mut self,
        budgets: Budgets,
        most_recent_outcome: f64,
    ) -> EngineResult<ScenarioResult> {
        assert!(
            budgets.iter().all(|b| *b <= 100),
            "budget out of range: {budgets:?}"
        );
        // Zero baseline makes the change metric undefined; fail before
        // spending a scoring call.
        if most_recent_outcome == 0.0 {
            return Err(EngineError::UndefinedChange);
        }

        if let Some(cached) = self.memo.get(&budgets) {
            log::debug!("predictor: memo hit for {budgets:?}");
            return Ok(*cached);
        }

        let mut spend = [0.0f64; CHANNEL_COUNT];
        for (slot, budget) in spend.iter_mut().zip(budgets.iter()) {
            *slot = f64::from(*budget) * SPEND_UNIT_MULTIPLIER;
        }

        let raw = self.scorer.score(&spend)?;
        if !raw.is_finite() {
            return Err(EngineError::prediction_service(format!(
                "non-finite scoring response {raw}"
            )));
        }

        let predicted_outcome = raw / OUTCOME_DISPLAY_DIVISOR;
        let percent_change = round_1dp(
            (predicted_outcome - most_recent_outcome) / most_recent_outcome * 100.0,
        );

        let result = ScenarioResult {
            predicted_outcome,
            percent_change,
        };
        self.memo.insert(budgets, result);

        log::info!(
            "predictor: {budgets:?} -> {predicted_outcome:.2}M ({percent_change:+.1}%)"
        );
        Ok(result)
    }

    /// Drop all memoized results. Called after a commit changes the
    /// percent-change baseline.
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
