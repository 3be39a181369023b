use core_types::{ActiveGame, GameRecord, Stat, StatLine, StatValue};
use serde::Serialize;
use tracing::debug;

/// Played games (coerced) and did-not-play games (untouched).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartitionedGames {
    pub active: Vec<ActiveGame>,
    pub inactive: Vec<GameRecord>,
}

/// Splits rows on the inactive sentinel in the points column.
///
/// Every input row lands in exactly one side; relative order is kept on both.
pub fn partition_games(records: &[GameRecord]) -> PartitionedGames {
    let mut partitioned = PartitionedGames::default();

    for record in records {
        if record.is_inactive() {
            partitioned.inactive.push(record.clone());
        } else {
            partitioned.active.push(coerce(record));
        }
    }

    debug!(
        "Partitioned {} games: {} active, {} inactive",
        records.len(),
        partitioned.active.len(),
        partitioned.inactive.len()
    );
    partitioned
}

/// Parses every stat cell. Cells that are not numbers become `Missing`.
fn coerce(record: &GameRecord) -> ActiveGame {
    let mut line = StatLine::default();

    for stat in Stat::ALL {
        let value = record.raw(stat).map(StatValue::parse).unwrap_or_default();
        if let (Some(raw), StatValue::Missing) = (record.raw(stat), value) {
            debug!(
                "Non-numeric {} '{}' vs {:?} ({}) treated as missing",
                stat, raw, record.opponent, record.season
            );
        }
        line.set(stat, value);
    }

    ActiveGame {
        season: record.season.clone(),
        opponent: record.opponent.clone(),
        date: record.date,
        details: record.details.clone(),
        line,
    }
}
