use crate::compose::descending;
use core_types::{ActiveGame, OpponentSummary, PointsSummary, Stat, StatAggregate, round2};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Groups played games by opponent and aggregates each requested stat.
///
/// Rows come out in ascending opponent-code order. Games with no opponent code
/// belong to no group and are skipped.
pub fn aggregate_by_opponent(active: &[ActiveGame], stats: &[Stat]) -> Vec<OpponentSummary> {
    let mut groups: BTreeMap<&str, Vec<&ActiveGame>> = BTreeMap::new();
    for game in active {
        match game.opponent.as_deref() {
            Some(opponent) => groups.entry(opponent).or_default().push(game),
            None => debug!("Skipping {} game without an opponent code", game.season),
        }
    }

    groups
        .into_iter()
        .map(|(opponent, games)| OpponentSummary {
            opponent: opponent.to_string(),
            games: games.len(),
            stats: stats
                .iter()
                .map(|&stat| (stat, aggregate_stat(&games, stat)))
                .collect(),
        })
        .collect()
}

/// Sum and mean over the non-missing values only.
fn aggregate_stat(games: &[&ActiveGame], stat: Stat) -> StatAggregate {
    let values: Vec<Decimal> = games
        .iter()
        .filter_map(|game| game.line.get(stat).as_decimal())
        .collect();

    if values.is_empty() {
        return StatAggregate::default();
    }

    let total: Decimal = values.iter().sum();
    let average = total / Decimal::from(values.len());

    StatAggregate {
        total: Some(round2(total)),
        average: Some(round2(average)),
    }
}

/// The generic summary table. When points are among `stats` the rows are
/// ordered by total points, highest first; otherwise by opponent code.
pub fn team_summary(active: &[ActiveGame], stats: &[Stat]) -> Vec<OpponentSummary> {
    let mut summaries = aggregate_by_opponent(active, stats);
    if stats.contains(&Stat::Points) {
        summaries.sort_by(|a, b| {
            descending(
                a.aggregate(Stat::Points).and_then(|points| points.total),
                b.aggregate(Stat::Points).and_then(|points| points.total),
            )
        });
    }
    summaries
}

/// Total and average points per opponent, highest total first.
pub fn points_summary(active: &[ActiveGame]) -> Vec<PointsSummary> {
    let mut rows: Vec<PointsSummary> = aggregate_by_opponent(active, &[Stat::Points])
        .into_iter()
        .map(|summary| {
            let points = summary.aggregate(Stat::Points).copied().unwrap_or_default();
            PointsSummary {
                opponent: summary.opponent,
                total_points: points.total,
                average_points: points.average,
            }
        })
        .collect();

    rows.sort_by(|a, b| descending(a.total_points, b.total_points));
    rows
}
