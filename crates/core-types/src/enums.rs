use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric box-score column.
///
/// The discriminant doubles as the index into a [`crate::StatLine`], so the
/// variant order must match [`Stat::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    FieldGoals,
    FieldGoalAttempts,
    FieldGoalPct,
    ThreePointers,
    ThreePointAttempts,
    ThreePointPct,
    TwoPointers,
    TwoPointAttempts,
    TwoPointPct,
    EffectiveFieldGoalPct,
    FreeThrows,
    FreeThrowAttempts,
    FreeThrowPct,
    OffensiveRebounds,
    DefensiveRebounds,
    TotalRebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    PersonalFouls,
    Points,
    GameScore,
    PlusMinus,
}

impl Stat {
    pub const COUNT: usize = 24;

    /// Every numeric column, in source-file order.
    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::FieldGoals,
        Stat::FieldGoalAttempts,
        Stat::FieldGoalPct,
        Stat::ThreePointers,
        Stat::ThreePointAttempts,
        Stat::ThreePointPct,
        Stat::TwoPointers,
        Stat::TwoPointAttempts,
        Stat::TwoPointPct,
        Stat::EffectiveFieldGoalPct,
        Stat::FreeThrows,
        Stat::FreeThrowAttempts,
        Stat::FreeThrowPct,
        Stat::OffensiveRebounds,
        Stat::DefensiveRebounds,
        Stat::TotalRebounds,
        Stat::Assists,
        Stat::Steals,
        Stat::Blocks,
        Stat::Turnovers,
        Stat::PersonalFouls,
        Stat::Points,
        Stat::GameScore,
        Stat::PlusMinus,
    ];

    /// The six statistics carried into the ranked table and the model.
    pub const TRACKED: [Stat; 6] = [
        Stat::Points,
        Stat::Assists,
        Stat::TotalRebounds,
        Stat::ThreePointers,
        Stat::Steals,
        Stat::Blocks,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The header used for this statistic in the season files.
    pub fn column(self) -> &'static str {
        match self {
            Stat::FieldGoals => "FG",
            Stat::FieldGoalAttempts => "FGA",
            Stat::FieldGoalPct => "FG%",
            Stat::ThreePointers => "3P",
            Stat::ThreePointAttempts => "3PA",
            Stat::ThreePointPct => "3P%",
            Stat::TwoPointers => "2P",
            Stat::TwoPointAttempts => "2PA",
            Stat::TwoPointPct => "2P%",
            Stat::EffectiveFieldGoalPct => "eFG%",
            Stat::FreeThrows => "FT",
            Stat::FreeThrowAttempts => "FTA",
            Stat::FreeThrowPct => "FT%",
            Stat::OffensiveRebounds => "ORB",
            Stat::DefensiveRebounds => "DRB",
            Stat::TotalRebounds => "TRB",
            Stat::Assists => "AST",
            Stat::Steals => "STL",
            Stat::Blocks => "BLK",
            Stat::Turnovers => "TOV",
            Stat::PersonalFouls => "PF",
            Stat::Points => "PTS",
            Stat::GameScore => "GmSc",
            Stat::PlusMinus => "+/-",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Stat {
    type Err = CoreError;

    /// Parses a column header, case-insensitively (`"pts"` and `"PTS"` both work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.column().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownStat(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_match_all_order() {
        for (i, stat) in Stat::ALL.iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }

    #[test]
    fn parses_column_names() {
        assert_eq!("PTS".parse::<Stat>(), Ok(Stat::Points));
        assert_eq!("efg%".parse::<Stat>(), Ok(Stat::EffectiveFieldGoalPct));
        assert_eq!(" 3P ".parse::<Stat>(), Ok(Stat::ThreePointers));
        assert_eq!("+/-".parse::<Stat>(), Ok(Stat::PlusMinus));
        assert_eq!(
            "Opp".parse::<Stat>(),
            Err(CoreError::UnknownStat("Opp".to_string()))
        );
    }
}
