use crate::enums::Stat;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The literal placed in the points column for a game the player sat out.
pub const INACTIVE_SENTINEL: &str = "Inac";

/// Historical franchise codes and the code they are reported under.
pub const OPPONENT_ALIASES: [(&str, &str); 2] = [("PHO", "PHX"), ("CHO", "CHA")];

/// Column names of the model features, in [`DerivedOpponentMetrics::features`] order.
pub const FEATURE_NAMES: [&str; 8] = [
    "Average PTS",
    "Average AST",
    "Average TRB",
    "Average 3P",
    "Average STL",
    "Average BLK",
    "Avg PTS + AST",
    "Avg PTS + REB",
];

/// Collapses a renamed franchise code onto its current code.
pub fn normalize_opponent(code: &str) -> String {
    let code = code.trim();
    OPPONENT_ALIASES
        .iter()
        .find(|(raw, _)| *raw == code)
        .map(|(_, current)| (*current).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Rounds to 2 decimal places with banker's rounding.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

// ==============================================================================
// Per-game rows
// ==============================================================================

/// A single statistic cell after numeric coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatValue {
    Numeric(Decimal),
    #[default]
    Missing,
}

impl StatValue {
    /// Coerces a raw cell. Anything that is not a number becomes `Missing`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        // `Decimal` wants a leading digit: ".455" -> "0.455"
        let normalized = if let Some(rest) = unsigned.strip_prefix("-.") {
            format!("-0.{rest}")
        } else if let Some(rest) = unsigned.strip_prefix('.') {
            format!("0.{rest}")
        } else {
            unsigned.to_string()
        };

        Decimal::from_str(&normalized)
            .or_else(|_| Decimal::from_scientific(&normalized))
            .map(StatValue::Numeric)
            .unwrap_or(StatValue::Missing)
    }

    pub fn as_decimal(self) -> Option<Decimal> {
        match self {
            StatValue::Numeric(value) => Some(value),
            StatValue::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, StatValue::Missing)
    }
}

/// One coerced value per [`Stat`], indexed by the stat's discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine([StatValue; Stat::COUNT]);

impl Default for StatLine {
    fn default() -> Self {
        Self([StatValue::Missing; Stat::COUNT])
    }
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> StatValue {
        self.0[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: StatValue) {
        self.0[stat.index()] = value;
    }
}

/// One row of a season file, as loaded. Statistic cells are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    /// Season tag taken from the file name, e.g. "2021-22".
    pub season: String,
    /// Normalized opponent code; `None` when the cell was empty.
    pub opponent: Option<String>,
    pub date: Option<NaiveDate>,
    /// Every other column, in file order, as `(header, cell)`.
    pub details: Vec<(String, String)>,
    stats: [Option<String>; Stat::COUNT],
}

impl GameRecord {
    pub fn new(season: impl Into<String>, opponent: Option<String>) -> Self {
        Self {
            season: season.into(),
            opponent,
            date: None,
            details: Vec::new(),
            stats: std::array::from_fn(|_| None),
        }
    }

    /// The raw cell for `stat`, `None` if the cell was empty.
    pub fn raw(&self, stat: Stat) -> Option<&str> {
        self.stats[stat.index()].as_deref()
    }

    pub fn set_raw(&mut self, stat: Stat, value: Option<String>) {
        self.stats[stat.index()] = value;
    }

    /// A game is inactive when the points cell is exactly the sentinel.
    pub fn is_inactive(&self) -> bool {
        self.raw(Stat::Points) == Some(INACTIVE_SENTINEL)
    }
}

/// A game the player took part in, with every stat coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveGame {
    pub season: String,
    pub opponent: Option<String>,
    pub date: Option<NaiveDate>,
    pub details: Vec<(String, String)>,
    pub line: StatLine,
}

// ==============================================================================
// Per-opponent tables
// ==============================================================================

/// Total and mean of one statistic over an opponent's games, both 2-dp.
/// `None` when every value in the group was missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatAggregate {
    pub total: Option<Decimal>,
    pub average: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentSummary {
    pub opponent: String,
    pub games: usize,
    pub stats: Vec<(Stat, StatAggregate)>,
}

impl OpponentSummary {
    pub fn aggregate(&self, stat: Stat) -> Option<&StatAggregate> {
        self.stats
            .iter()
            .find(|(candidate, _)| *candidate == stat)
            .map(|(_, aggregate)| aggregate)
    }

    pub fn average(&self, stat: Stat) -> Option<Decimal> {
        self.aggregate(stat).and_then(|aggregate| aggregate.average)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsSummary {
    pub opponent: String,
    pub total_points: Option<Decimal>,
    pub average_points: Option<Decimal>,
}

/// One row of the ranked table that feeds the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedOpponentMetrics {
    pub opponent: String,
    pub points: Option<Decimal>,
    pub assists: Option<Decimal>,
    pub rebounds: Option<Decimal>,
    pub threes: Option<Decimal>,
    pub steals: Option<Decimal>,
    pub blocks: Option<Decimal>,
    pub points_assists: Option<Decimal>,
    pub points_rebounds: Option<Decimal>,
}

impl DerivedOpponentMetrics {
    /// The eight numeric columns in [`FEATURE_NAMES`] order.
    pub fn values(&self) -> [Option<Decimal>; 8] {
        [
            self.points,
            self.assists,
            self.rebounds,
            self.threes,
            self.steals,
            self.blocks,
            self.points_assists,
            self.points_rebounds,
        ]
    }

    pub fn features(&self) -> [Option<f64>; 8] {
        self.values().map(|value| value.and_then(|v| v.to_f64()))
    }

    pub fn is_complete(&self) -> bool {
        self.features().iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stat_value_parse() {
        assert_eq!(StatValue::parse("31"), StatValue::Numeric(dec!(31)));
        assert_eq!(StatValue::parse(" 12.5 "), StatValue::Numeric(dec!(12.5)));
        assert_eq!(StatValue::parse(".455"), StatValue::Numeric(dec!(0.455)));
        assert_eq!(StatValue::parse("-.5"), StatValue::Numeric(dec!(-0.5)));
        assert_eq!(StatValue::parse("+7"), StatValue::Numeric(dec!(7)));
        assert_eq!(StatValue::parse("-12"), StatValue::Numeric(dec!(-12)));
        assert_eq!(StatValue::parse("1e2"), StatValue::Numeric(dec!(100)));
        assert_eq!(StatValue::parse("0"), StatValue::Numeric(dec!(0)));
    }

    #[test]
    fn test_stat_value_coerces_junk_to_missing() {
        assert!(StatValue::parse("").is_missing());
        assert!(StatValue::parse("Inac").is_missing());
        assert!(StatValue::parse("Did Not Play").is_missing());
        assert!(StatValue::parse("NaN").is_missing());
    }

    #[test]
    fn test_round2_is_idempotent() {
        for value in [dec!(20.125), dec!(31.75), dec!(-4.335), dec!(7)] {
            let once = round2(value);
            assert_eq!(round2(once), once);
        }
        assert_eq!(round2(dec!(20.125)), dec!(20.12));
        assert_eq!(round2(dec!(20.135)), dec!(20.14));
    }

    #[test]
    fn test_normalize_opponent() {
        assert_eq!(normalize_opponent("PHO"), "PHX");
        assert_eq!(normalize_opponent("CHO"), "CHA");
        assert_eq!(normalize_opponent(" LAL "), "LAL");
        assert_eq!(normalize_opponent("PHX"), "PHX");
    }

    #[test]
    fn test_inactive_detection_is_exact() {
        let mut record = GameRecord::new("2021-22", Some("BOS".to_string()));
        record.set_raw(Stat::Points, Some("Inac".to_string()));
        assert!(record.is_inactive());

        record.set_raw(Stat::Points, Some("inac".to_string()));
        assert!(!record.is_inactive());

        record.set_raw(Stat::Points, None);
        assert!(!record.is_inactive());
    }

    #[test]
    fn test_derived_completeness() {
        let mut row = DerivedOpponentMetrics {
            opponent: "BOS".to_string(),
            points: Some(dec!(25.5)),
            assists: Some(dec!(6.25)),
            rebounds: Some(dec!(5)),
            threes: Some(dec!(4.5)),
            steals: Some(dec!(1)),
            blocks: Some(dec!(0.25)),
            points_assists: Some(dec!(31.75)),
            points_rebounds: Some(dec!(30.5)),
        };
        assert!(row.is_complete());
        assert_eq!(row.features()[6], Some(31.75));

        row.blocks = None;
        assert!(!row.is_complete());
    }
}
