use adspend_core::{
    merger,
    types::{Channel, Period, ScenarioInput, ScenarioResult, SeriesRow},
};

fn history() -> Vec<SeriesRow> {
    let mut rows = Vec::new();
    for (period, budgets, outcome) in [
        (Period::May, [60.0, 50.0, 42.0, 32.0], 15.2),
        (Period::June, [65.0, 55.0, 48.0, 35.0], 16.9),
    ] {
        for channel in Channel::ALL {
            rows.push(SeriesRow {
                period,
                channel,
                budget: budgets[channel.index()],
                outcome,
            });
        }
    }
    rows
}

fn scenario() -> (ScenarioInput, ScenarioResult) {
    (
        ScenarioInput { budgets: [35, 50, 75, 85] },
        ScenarioResult {
            predicted_outcome: 14.2,
            percent_change:    -16.0,
        },
    )
}

#[test]
fn merge_appends_exactly_four_synthetic_rows() {
    let full = history();
    let (input, result) = scenario();

    let combined = merger::merge(&full, &input, &result, Period::July);

    assert_eq!(combined.len(), full.len() + 4);
    assert_eq!(combined.iter().filter(|r| r.synthetic).count(), 4);
}

#[test]
fn merge_does_not_mutate_the_historical_series() {
    let full = history();
    let before = full.clone();
    let (input, result) = scenario();

    let _ = merger::merge(&full, &input, &result, Period::July);

    assert_eq!(full, before);
}

#[test]
fn historical_rows_come_first_in_stored_order() {
    let full = history();
    let (input, result) = scenario();

    let combined = merger::merge(&full, &input, &result, Period::July);

    for (i, row) in full.iter().enumerate() {
        assert_eq!(combined[i].period, row.period);
        assert_eq!(combined[i].channel, row.channel);
        assert_eq!(combined[i].budget, row.budget);
        assert_eq!(combined[i].outcome, row.outcome);
        assert!(!combined[i].synthetic);
    }
}

#[test]
fn synthetic_rows_sort_last_and_follow_channel_order() {
    let full = history();
    let (input, result) = scenario();

    let combined = merger::merge(&full, &input, &result, Period::July);
    let synthetic: Vec<_> = combined.iter().filter(|r| r.synthetic).collect();

    // Synthetic rows are the tail of the series.
    assert!(combined[full.len()..].iter().all(|r| r.synthetic));
    for (row, channel) in synthetic.iter().zip(Channel::ALL) {
        assert_eq!(row.period, Period::July);
        assert_eq!(row.channel, channel);
        assert_eq!(row.budget, f64::from(input.budget_for(channel)));
    }
}

#[test]
fn predicted_outcome_is_replicated_across_channels() {
    // The model yields no per-channel breakdown, so the one scalar appears
    // on all four synthetic rows.
    let full = history();
    let (input, result) = scenario();

    let combined = merger::merge(&full, &input, &result, Period::July);

    for row in combined.iter().filter(|r| r.synthetic) {
        assert_eq!(row.outcome, 14.2);
    }
}

#[test]
fn channel_display_labels_stay_bijective() {
    // Loader codes and synthetic rows share one Channel type; the display
    // mapping must invert cleanly for both.
    for channel in Channel::ALL {
        assert_eq!(Channel::from_label(channel.label()), Some(channel));
    }
    let labels: std::collections::HashSet<_> =
        Channel::ALL.iter().map(|c| c.label()).collect();
    assert_eq!(labels.len(), Channel::ALL.len());
}
