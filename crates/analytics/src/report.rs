use core_types::{DerivedOpponentMetrics, GameRecord, OpponentSummary, normalize_opponent};
use serde::Serialize;

/// Everything one pipeline run produces.
///
/// This struct is the output of the `AnalyticsEngine` and the input of the
/// forecaster and the CLI tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Rows that reached the partitioner.
    pub total_games: usize,
    pub active_games: usize,
    /// Did-not-play rows, unmodified, for reference.
    pub inactive: Vec<GameRecord>,
    /// Per-opponent aggregates of the six tracked stats, by opponent code.
    pub summaries: Vec<OpponentSummary>,
    /// The derived table, best average points first.
    pub ranking: Vec<DerivedOpponentMetrics>,
}

impl PipelineReport {
    /// Looks up an opponent in the ranking. Raw aliases such as `PHO` resolve
    /// to their current code; `None` means no active games against them.
    pub fn opponent(&self, code: &str) -> Option<&DerivedOpponentMetrics> {
        let code = normalize_opponent(&code.to_ascii_uppercase());
        self.ranking.iter().find(|row| row.opponent == code)
    }
}
