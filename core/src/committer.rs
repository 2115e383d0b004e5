//! Scenario committer — persists an accepted scenario as a new historical
//! record.
//!
//! Writes exactly one row under the promoted period label (the reserved
//! scenario period becomes the next real historical period). Not
//! idempotent: every call appends. The session gates it behind an explicit
//! confirmation and owns cache invalidation, which happens only after this
//! returns Ok.

use crate::{
    error::EngineResult,
    store::ScenarioStore,
    types::{Channel, Period, ScenarioInput, ScenarioResult, WideRow, CHANNEL_COUNT},
};

pub fn commit(
    store: &ScenarioStore,
    period: Period,
    input: &ScenarioInput,
    result: &ScenarioResult,
) -> EngineResult<()> {
    let mut budgets = [0.0f64; CHANNEL_COUNT];
    for channel in Channel::ALL {
        budgets[channel.index()] = f64::from(input.budget_for(channel));
    }

    store.append_row(&WideRow {
        period,
        budgets,
        outcome: result.predicted_outcome,
    })?;

    log::info!(
        "committer: promoted scenario to {period} (predicted {:.2}M)",
        result.predicted_outcome
    );
    Ok(())
}
