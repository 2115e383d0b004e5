//! Scenario merger — fuses the live scenario into the historical series
//! for unified display.
//!
//! Pure function: no I/O, no mutation of inputs. The rendering layer gets
//! exactly one artifact per interaction, the combined series this module
//! builds.

use crate::types::{Channel, CombinedRow, Period, ScenarioInput, ScenarioResult, SeriesRow};

/// Build the combined series: every historical row in stored order, then
/// exactly four synthetic rows (one per channel) for the reserved scenario
/// period.
///
/// The predicted outcome is a single scalar with no per-channel breakdown,
/// so it is replicated across all four synthetic rows. Known approximation;
/// changing it would require a different model output contract.
pub fn merge(
    full_series: &[SeriesRow],
    input: &ScenarioInput,
    result: &ScenarioResult,
    scenario_period: Period,
) -> Vec<CombinedRow> {
    let mut combined = Vec::with_capacity(full_series.len() + Channel::ALL.len());

    for row in full_series {
        combined.push(CombinedRow {
            period:    row.period,
            channel:   row.channel,
            budget:    row.budget,
            outcome:   row.outcome,
            synthetic: false,
        });
    }

    // Synthetic rows go last: the scenario period is the successor of the
    // latest historical one, so this also matches calendar order.
    for channel in Channel::ALL {
        combined.push(CombinedRow {
            period:    scenario_period,
            channel,
            budget:    f64::from(input.budget_for(channel)),
            outcome:   result.predicted_outcome,
            synthetic: true,
        });
    }

    combined
}
