use adspend_core::{
    error::{EngineError, EngineResult},
    predictor::ScenarioPredictor,
    scoring::ScoringService,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Scoring fake that always returns the same raw value.
struct FixedScorer(f64);

impl ScoringService for FixedScorer {
    fn score(&self, _spend: &[f64; 4]) -> EngineResult<f64> {
        Ok(self.0)
    }
}

/// Scoring fake that records how often and with what it was called.
struct CountingScorer {
    value: f64,
    calls: Rc<Cell<usize>>,
    seen:  Rc<RefCell<Vec<[f64; 4]>>>,
}

impl CountingScorer {
    fn new(value: f64) -> (Self, Rc<Cell<usize>>, Rc<RefCell<Vec<[f64; 4]>>>) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                value,
                calls: calls.clone(),
                seen: seen.clone(),
            },
            calls,
            seen,
        )
    }
}

impl ScoringService for CountingScorer {
    fn score(&self, spend: &[f64; 4]) -> EngineResult<f64> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(*spend);
        Ok(self.value)
    }
}

/// Scoring fake that always fails.
struct FailingScorer;

impl ScoringService for FailingScorer {
    fn score(&self, _spend: &[f64; 4]) -> EngineResult<f64> {
        Err(EngineError::prediction_service("service unavailable"))
    }
}

#[test]
fn zero_budgets_and_zero_score_give_minus_hundred_percent() {
    let mut predictor = ScenarioPredictor::new(Box::new(FixedScorer(0.0)));

    let result = predictor.predict([0, 0, 0, 0], 5.0).unwrap();
    assert_eq!(result.predicted_outcome, 0.0);
    assert_eq!(result.percent_change, -100.0);
}

#[test]
fn zero_baseline_fails_regardless_of_scoring_response() {
    // The scorer would fail too, but the baseline check comes first and no
    // scoring call is made at all.
    let mut predictor = ScenarioPredictor::new(Box::new(FailingScorer));

    let err = predictor.predict([10, 20, 30, 40], 0.0).unwrap_err();
    assert!(matches!(err, EngineError::UndefinedChange), "got {err}");
}

#[test]
fn spend_vector_is_unit_scaled_before_the_call() {
    let (scorer, _calls, seen) = CountingScorer::new(1_000_000.0);
    let mut predictor = ScenarioPredictor::new(Box::new(scorer));

    predictor.predict([35, 50, 75, 85], 10.0).unwrap();

    let sent = seen.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], [35_000.0, 50_000.0, 75_000.0, 85_000.0]);
}

#[test]
fn raw_response_is_rescaled_to_display_units() {
    // 1_500_000 raw / 100_000 = 15.0 displayed millions.
    let mut predictor = ScenarioPredictor::new(Box::new(FixedScorer(1_500_000.0)));

    let result = predictor.predict([65, 55, 48, 35], 16.9).unwrap();
    assert_eq!(result.predicted_outcome, 15.0);
}

#[test]
fn percent_change_is_rounded_to_one_decimal() {
    // predicted = 8.76543, baseline = 8.0 -> +9.567875% -> 9.6
    let mut predictor = ScenarioPredictor::new(Box::new(FixedScorer(876_543.0)));

    let result = predictor.predict([10, 10, 10, 10], 8.0).unwrap();
    assert_eq!(result.percent_change, 9.6);
}

#[test]
fn identical_tuples_are_memoized() {
    let (scorer, calls, _seen) = CountingScorer::new(900_000.0);
    let mut predictor = ScenarioPredictor::new(Box::new(scorer));

    let first = predictor.predict([30, 40, 50, 60], 10.0).unwrap();
    let second = predictor.predict([30, 40, 50, 60], 10.0).unwrap();

    assert_eq!(calls.get(), 1, "second call must hit the memo");
    assert_eq!(first, second);
}

#[test]
fn memo_key_is_order_sensitive() {
    let (scorer, calls, _seen) = CountingScorer::new(900_000.0);
    let mut predictor = ScenarioPredictor::new(Box::new(scorer));

    predictor.predict([30, 40, 50, 60], 10.0).unwrap();
    predictor.predict([60, 50, 40, 30], 10.0).unwrap();

    assert_eq!(calls.get(), 2, "permuted tuple is a different scenario");
}

#[test]
fn clearing_the_memo_forces_a_fresh_scoring_call() {
    let (scorer, calls, _seen) = CountingScorer::new(900_000.0);
    let mut predictor = ScenarioPredictor::new(Box::new(scorer));

    predictor.predict([30, 40, 50, 60], 10.0).unwrap();
    predictor.clear_memo();
    predictor.predict([30, 40, 50, 60], 10.0).unwrap();

    assert_eq!(calls.get(), 2);
}

#[test]
fn scoring_failure_surfaces_as_prediction_service_error() {
    let mut predictor = ScenarioPredictor::new(Box::new(FailingScorer));

    let err = predictor.predict([10, 20, 30, 40], 5.0).unwrap_err();
    assert!(matches!(err, EngineError::PredictionService { .. }), "got {err}");
}

#[test]
fn non_finite_scoring_response_is_rejected() {
    let mut predictor = ScenarioPredictor::new(Box::new(FixedScorer(f64::NAN)));

    let err = predictor.predict([10, 20, 30, 40], 5.0).unwrap_err();
    assert!(matches!(err, EngineError::PredictionService { .. }), "got {err}");
}

#[test]
#[should_panic(expected = "budget out of range")]
fn out_of_range_budget_is_a_contract_violation() {
    let mut predictor = ScenarioPredictor::new(Box::new(FixedScorer(0.0)));
    let _ = predictor.predict([101, 0, 0, 0], 5.0);
}
