//! Historical series loader — reshapes the wide allocation table into the
//! long-form views the rest of the engine works on.
//!
//! Runs once per session; the session caches the result and invalidates it
//! after a successful commit. Recomputing is always safe: the loader reads
//! only and is deterministic for a fixed table state.

use crate::{
    error::{EngineError, EngineResult},
    store::ScenarioStore,
    types::{
        AllocationRecord, Budgets, Channel, OutcomeRecord, Period, SeriesRow, WideRow,
        CHANNEL_COUNT,
    },
};

/// The derived views of the historical table.
#[derive(Debug, Clone)]
pub struct HistoricalViews {
    /// Long-form rows: one per (period, channel), outcome included.
    pub full_series: Vec<SeriesRow>,
    /// Long-form rows without outcomes.
    pub allocation_series: Vec<AllocationRecord>,
    /// One outcome row per period, de-duplicated across the unpivot.
    pub outcome_series: Vec<OutcomeRecord>,
    /// The most recent real period's per-channel budgets. Seeds the default
    /// slider values, so clamped into the slider range [0, 100].
    pub latest_allocations: Budgets,
    /// The most recent real period.
    pub latest_period: Period,
    /// The period reserved for the live scenario: the successor of
    /// `latest_period`, or `None` once the calendar is exhausted.
    pub next_period: Option<Period>,
}

impl HistoricalViews {
    /// The outcome the percent-change metric is measured against.
    pub fn most_recent_outcome(&self) -> f64 {
        // outcome_series is non-empty by construction (load rejects an
        // empty table).
        self.outcome_series
            .last()
            .map(|r| r.outcome)
            .unwrap_or(0.0)
    }
}

/// Load and reshape the historical table. Pure read; no mutation.
pub fn load(store: &ScenarioStore) -> EngineResult<HistoricalViews> {
    let mut rows = store.wide_rows()?;
    validate_shape(&rows)?;
    rows.sort_by_key(|r| r.period);

    let mut full_series = Vec::with_capacity(rows.len() * CHANNEL_COUNT);
    let mut allocation_series = Vec::with_capacity(rows.len() * CHANNEL_COUNT);
    let mut outcome_series = Vec::with_capacity(rows.len());

    for row in &rows {
        for channel in Channel::ALL {
            let budget = row.budgets[channel.index()];
            full_series.push(SeriesRow {
                period: row.period,
                channel,
                budget,
                outcome: row.outcome,
            });
            allocation_series.push(AllocationRecord {
                period: row.period,
                channel,
                budget,
            });
        }
        // One outcome per period regardless of the four-way unpivot.
        outcome_series.push(OutcomeRecord {
            period:  row.period,
            outcome: row.outcome,
        });
    }

    let latest = rows
        .last()
        .ok_or_else(|| EngineError::data_shape("historical table is empty"))?;
    let latest_allocations = slider_defaults(latest);

    log::debug!(
        "loader: {} periods, latest {}, next {:?}",
        rows.len(),
        latest.period,
        latest.period.successor(),
    );

    Ok(HistoricalViews {
        full_series,
        allocation_series,
        outcome_series,
        latest_allocations,
        latest_period: latest.period,
        next_period: latest.period.successor(),
    })
}

/// Shape checks on the raw wide table.
///
/// Periods must be distinct and form a contiguous calendar run starting at
/// January. Contiguity is what keeps the reserved live-scenario label out
/// of history: the store only ever contains promoted periods, and the
/// reserved label is derived as the successor of the latest one.
fn validate_shape(rows: &[WideRow]) -> EngineResult<()> {
    if rows.is_empty() {
        return Err(EngineError::data_shape("historical table is empty"));
    }

    let mut periods: Vec<Period> = rows.iter().map(|r| r.period).collect();
    periods.sort();
    for pair in periods.windows(2) {
        if pair[0] == pair[1] {
            return Err(EngineError::data_shape(format!(
                "duplicate period {}",
                pair[0]
            )));
        }
    }
    let mut expected = Some(Period::January);
    for period in &periods {
        match expected {
            Some(p) if p == *period => expected = p.successor(),
            _ => {
                return Err(EngineError::data_shape(format!(
                    "periods are not a contiguous run from January (found {period})"
                )))
            }
        }
    }

    for row in rows {
        for channel in Channel::ALL {
            let budget = row.budgets[channel.index()];
            if budget < 0.0 || !budget.is_finite() {
                return Err(EngineError::data_shape(format!(
                    "invalid budget {budget} for {} in {}",
                    channel, row.period
                )));
            }
        }
        if !row.outcome.is_finite() {
            return Err(EngineError::data_shape(format!(
                "invalid outcome for {}",
                row.period
            )));
        }
    }

    Ok(())
}

/// Default slider positions: the latest period's budgets, rounded and
/// clamped into the slider range.
fn slider_defaults(latest: &WideRow) -> Budgets {
    let mut defaults = [0u32; CHANNEL_COUNT];
    for channel in Channel::ALL {
        defaults[channel.index()] =
            latest.budgets[channel.index()].clamp(0.0, 100.0).round() as u32;
    }
    defaults
}
