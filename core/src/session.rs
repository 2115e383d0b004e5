//! Interactive session — owns every piece of session-scoped state.
//!
//! RULES:
//!   - One session per user; no state is shared across sessions.
//!   - The store handle and scorer are injected, never ambient globals.
//!   - Caches (historical views, prediction memo) live here and are
//!     invalidated explicitly — only after a confirmed successful commit.
//!   - All remote calls are blocking round-trips; nothing here is
//!     concurrent.

use crate::{
    committer,
    error::{EngineError, EngineResult},
    loader::{self, HistoricalViews},
    merger,
    predictor::ScenarioPredictor,
    scoring::ScoringService,
    store::ScenarioStore,
    types::{Budgets, CombinedRow, Period, ScenarioInput, ScenarioResult, SessionId},
};

pub struct ScenarioSession {
    session_id: SessionId,
    store:      ScenarioStore,
    predictor:  ScenarioPredictor,
    views:      Option<HistoricalViews>, // populated on first use
    budgets:    Budgets,                 // current slider state
}

impl ScenarioSession {
    /// Start a session against an already-migrated store. Loads the
    /// historical views eagerly so the sliders can be seeded from the most
    /// recent period's allocations.
    pub fn new(store: ScenarioStore, scorer: Box<dyn ScoringService>) -> EngineResult<Self> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let views = loader::load(&store)?;
        let budgets = views.latest_allocations;
        log::info!(
            "session {session_id}: started, {} historical periods, default budgets {budgets:?}",
            views.outcome_series.len()
        );
        Ok(Self {
            session_id,
            store,
            predictor: ScenarioPredictor::new(scorer),
            views: Some(views),
            budgets,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn budgets(&self) -> Budgets {
        self.budgets
    }

    /// Update the slider state. The session owns clamping into [0, 100];
    /// downstream components treat out-of-range values as contract
    /// violations.
    pub fn set_budgets(&mut self, budgets: Budgets) {
        let mut clamped = budgets;
        for value in &mut clamped {
            *value = (*value).min(100);
        }
        if clamped != budgets {
            log::warn!(
                "session {}: budgets {budgets:?} clamped to {clamped:?}",
                self.session_id
            );
        }
        self.budgets = clamped;
    }

    /// The cached historical views, loading them if invalidated.
    pub fn views(&mut self) -> EngineResult<&HistoricalViews> {
        self.ensure_views()?;
        Ok(self.views.as_ref().expect("views populated by ensure_views"))
    }

    /// One interaction: score the current budgets (memoized) and merge the
    /// scenario into the historical series. Returns the prediction and the
    /// single rendering artifact.
    pub fn simulate(&mut self) -> EngineResult<(ScenarioResult, Vec<CombinedRow>)> {
        self.ensure_views()?;
        let views = self.views.as_ref().expect("views populated by ensure_views");
        let scenario_period = scenario_period(views)?;
        let baseline = views.most_recent_outcome();

        let input = ScenarioInput { budgets: self.budgets };
        let result = self.predictor.predict(self.budgets, baseline)?;
        let combined = merger::merge(&views.full_series, &input, &result, scenario_period);
        Ok((result, combined))
    }

    /// Persist the current scenario as the next historical period.
    ///
    /// Exactly one append per call — callers gate this behind an explicit
    /// user confirmation. On success the cached views and the prediction
    /// memo are invalidated (the committed row is new history and the
    /// percent-change baseline moved); on failure nothing changes.
    pub fn commit(&mut self) -> EngineResult<Period> {
        self.ensure_views()?;
        let views = self.views.as_ref().expect("views populated by ensure_views");
        let period = scenario_period(views)?;
        let baseline = views.most_recent_outcome();

        let input = ScenarioInput { budgets: self.budgets };
        let result = self.predictor.predict(self.budgets, baseline)?;
        committer::commit(&self.store, period, &input, &result)?;

        // Invalidation only after the confirmed write.
        self.invalidate();
        log::info!("session {}: committed {period}", self.session_id);
        Ok(period)
    }

    /// Drop the cached views and memoized predictions. The next
    /// interaction reloads from the store.
    pub fn invalidate(&mut self) {
        self.views = None;
        self.predictor.clear_memo();
    }

    fn ensure_views(&mut self) -> EngineResult<()> {
        if self.views.is_none() {
            let views = loader::load(&self.store)?;
            log::debug!("session {}: historical views reloaded", self.session_id);
            self.views = Some(views);
        }
        Ok(())
    }
}

fn scenario_period(views: &HistoricalViews) -> EngineResult<Period> {
    views.next_period.ok_or(EngineError::CalendarExhausted {
        last: views.latest_period,
    })
}
