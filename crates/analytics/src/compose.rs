use crate::error::AnalyticsError;
use core_types::{DerivedOpponentMetrics, OpponentSummary, Stat, round2};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Builds the ranked table: six averages plus two combined metrics, best
/// average points first.
///
/// Ties on average points are broken by ascending opponent code; a missing
/// average sorts last. Fails if a summary lacks one of the six averages.
pub fn compose_derived_metrics(
    summaries: &[OpponentSummary],
) -> Result<Vec<DerivedOpponentMetrics>, AnalyticsError> {
    let mut rows = summaries
        .iter()
        .map(derive_row)
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| a.opponent.cmp(&b.opponent));
    rows.sort_by(|a, b| descending(a.points, b.points));
    Ok(rows)
}

fn derive_row(summary: &OpponentSummary) -> Result<DerivedOpponentMetrics, AnalyticsError> {
    let average = |stat: Stat| -> Result<Option<Decimal>, AnalyticsError> {
        summary
            .aggregate(stat)
            .map(|aggregate| aggregate.average.map(round2))
            .ok_or_else(|| AnalyticsError::MissingStat {
                opponent: summary.opponent.clone(),
                stat,
            })
    };

    let points = average(Stat::Points)?;
    let assists = average(Stat::Assists)?;
    let rebounds = average(Stat::TotalRebounds)?;

    Ok(DerivedOpponentMetrics {
        opponent: summary.opponent.clone(),
        points,
        assists,
        rebounds,
        threes: average(Stat::ThreePointers)?,
        steals: average(Stat::Steals)?,
        blocks: average(Stat::Blocks)?,
        points_assists: combine(points, assists),
        points_rebounds: combine(points, rebounds),
    })
}

fn combine(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    Some(round2(a? + b?))
}

/// Orders larger values first; `None` goes after every value.
pub(crate) fn descending(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
