use crate::aggregate::aggregate_by_opponent;
use crate::compose::compose_derived_metrics;
use crate::error::AnalyticsError;
use crate::partition::partition_games;
use crate::report::PipelineReport;
use core_types::{GameRecord, Stat};
use tracing::info;

/// A stateless calculator for turning loaded rows into per-opponent tables.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: partition, aggregate the tracked stats by
    /// opponent, then compose the ranked table.
    ///
    /// # Arguments
    ///
    /// * `records` - Every loaded row, across all seasons.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PipelineReport` or an `AnalyticsError`.
    pub fn run(&self, records: &[GameRecord]) -> Result<PipelineReport, AnalyticsError> {
        let partitioned = partition_games(records);

        let summaries = aggregate_by_opponent(&partitioned.active, &Stat::TRACKED);
        let ranking = compose_derived_metrics(&summaries)?;

        info!(
            "Aggregated {} active games ({} inactive) into {} opponents",
            partitioned.active.len(),
            partitioned.inactive.len(),
            summaries.len()
        );

        Ok(PipelineReport {
            total_games: records.len(),
            active_games: partitioned.active.len(),
            inactive: partitioned.inactive,
            summaries,
            ranking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(opponent: &str, points: &str, assists: &str, rebounds: &str) -> GameRecord {
        let mut record = GameRecord::new("2024-25", Some(opponent.to_string()));
        record.set_raw(Stat::Points, Some(points.to_string()));
        record.set_raw(Stat::Assists, Some(assists.to_string()));
        record.set_raw(Stat::TotalRebounds, Some(rebounds.to_string()));
        for stat in [Stat::ThreePointers, Stat::Steals, Stat::Blocks] {
            record.set_raw(stat, Some("1".to_string()));
        }
        record
    }

    #[test]
    fn test_run_end_to_end() {
        let records = vec![
            record("PHX", "30", "6", "5"),
            record("PHX", "20", "8", "3"),
            record("DAL", "Inac", "Inac", "Inac"),
            record("DAL", "41", "4", "7"),
            record("NYK", "12", "x", "4"),
        ];

        let report = AnalyticsEngine::new().run(&records).unwrap();
        assert_eq!(report.total_games, 5);
        assert_eq!(report.active_games, 4);
        assert_eq!(report.inactive.len(), 1);

        let codes: Vec<_> = report.summaries.iter().map(|s| s.opponent.as_str()).collect();
        assert_eq!(codes, vec!["DAL", "NYK", "PHX"]);

        let ranked: Vec<_> = report.ranking.iter().map(|r| r.opponent.as_str()).collect();
        assert_eq!(ranked, vec!["DAL", "PHX", "NYK"]);

        let phx = report.opponent("pho").unwrap();
        assert_eq!(phx.points, Some(dec!(25)));
        assert_eq!(phx.points_assists, Some(dec!(32)));
        assert_eq!(phx.points_rebounds, Some(dec!(29)));

        let nyk = report.opponent("NYK").unwrap();
        assert_eq!(nyk.assists, None);
        assert_eq!(nyk.points_assists, None);

        assert!(report.opponent("TOR").is_none());
    }

    #[test]
    fn test_run_on_no_rows() {
        let report = AnalyticsEngine::new().run(&[]).unwrap();
        assert!(report.summaries.is_empty());
        assert!(report.ranking.is_empty());
    }
}
