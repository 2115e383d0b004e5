//! Shared primitive types used across the entire engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical session identifier (uuid v4, generated per session).
pub type SessionId = String;

/// Number of advertising channels. Fixed by the scoring model contract.
pub const CHANNEL_COUNT: usize = 4;

/// Slider-driven budget allocations, one per channel in `Channel::ALL`
/// order. Each value is in [0, 100].
pub type Budgets = [u32; CHANNEL_COUNT];

/// An advertising spend channel.
///
/// The positional order of `Channel::ALL` is a hard contract: the scoring
/// request vector, the wide-table columns, and the synthetic scenario rows
/// all use it. Never reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    SearchEngine,
    SocialMedia,
    Video,
    Email,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::SearchEngine,
        Channel::SocialMedia,
        Channel::Video,
        Channel::Email,
    ];

    /// Column name in the wide allocation table.
    pub fn column(self) -> &'static str {
        match self {
            Channel::SearchEngine => "search_engine",
            Channel::SocialMedia  => "social_media",
            Channel::Video        => "video",
            Channel::Email        => "email",
        }
    }

    /// Human-readable label for the rendering layer. Bijective with the
    /// channel set — see `from_label`.
    pub fn label(self) -> &'static str {
        match self {
            Channel::SearchEngine => "Search engine",
            Channel::SocialMedia  => "Social media",
            Channel::Video        => "Video",
            Channel::Email        => "Email",
        }
    }

    /// Inverse of `label`.
    pub fn from_label(label: &str) -> Option<Channel> {
        Channel::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Position in `Channel::ALL`.
    pub fn index(self) -> usize {
        match self {
            Channel::SearchEngine => 0,
            Channel::SocialMedia  => 1,
            Channel::Video        => 2,
            Channel::Email        => 3,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A calendar period. The engine works over a fixed seven-period sequence;
/// history occupies a contiguous prefix, and the period after the latest
/// historical one is reserved for the live, uncommitted scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::January,
        Period::February,
        Period::March,
        Period::April,
        Period::May,
        Period::June,
        Period::July,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Period::January  => "January",
            Period::February => "February",
            Period::March    => "March",
            Period::April    => "April",
            Period::May      => "May",
            Period::June     => "June",
            Period::July     => "July",
        }
    }

    /// Inverse of `label`. Unknown labels are a shape error at the caller.
    pub fn parse(label: &str) -> Option<Period> {
        Period::ALL.iter().copied().find(|p| p.label() == label)
    }

    /// The next period in calendar order, or `None` after the final one.
    pub fn successor(self) -> Option<Period> {
        let idx = Period::ALL.iter().position(|p| *p == self)?;
        Period::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the wide historical table: a period, one budget per channel
/// (in `Channel::ALL` order) and the realized outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    pub period:  Period,
    pub budgets: [f64; CHANNEL_COUNT],
    pub outcome: f64,
}

/// Long-form allocation row. Exactly one exists per (period, channel).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRecord {
    pub period:  Period,
    pub channel: Channel,
    pub budget:  f64,
}

/// Per-period outcome, independent of channel. At most one per period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    pub period:  Period,
    pub outcome: f64,
}

/// Long-form full-series row: allocation plus that period's outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub period:  Period,
    pub channel: Channel,
    pub budget:  f64,
    pub outcome: f64,
}

/// The user's current budget allocation. Owned by the session; mutated only
/// through `ScenarioSession::set_budgets`; never persisted directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub budgets: Budgets,
}

impl ScenarioInput {
    pub fn budget_for(&self, channel: Channel) -> u32 {
        self.budgets[channel.index()]
    }
}

/// Derived prediction for the current scenario. Ephemeral — recomputed on
/// every input change, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// Predicted outcome in display units (millions).
    pub predicted_outcome: f64,
    /// Change vs the most recent historical outcome, rounded to 1 decimal.
    pub percent_change: f64,
}

/// One row of the combined (historical + live scenario) series handed to
/// the rendering layer. `synthetic` marks the live-scenario rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRow {
    pub period:    Period,
    pub channel:   Channel,
    pub budget:    f64,
    pub outcome:   f64,
    pub synthetic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_labels_are_bijective() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_label(channel.label()), Some(channel));
        }
    }

    #[test]
    fn channel_index_matches_all_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn period_order_is_calendar_order() {
        assert!(Period::January < Period::June);
        assert_eq!(Period::June.successor(), Some(Period::July));
        assert_eq!(Period::July.successor(), None);
    }

    #[test]
    fn period_labels_round_trip() {
        for period in Period::ALL {
            assert_eq!(Period::parse(period.label()), Some(period));
        }
    }
}
