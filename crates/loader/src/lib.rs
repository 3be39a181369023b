//! Season file loading.
//!
//! Turns a list of `<player>_<season>_<suffix>` box-score files into one
//! ordered sequence of [`GameRecord`]s: seasons in the order given, rows in
//! file order, empty rows dropped and opponent codes normalized.

use chrono::NaiveDate;
use core_types::{GameRecord, Stat, normalize_opponent};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub mod error;

pub use error::LoadError;

const OPPONENT_COLUMN: &str = "Opp";
const DATE_COLUMN: &str = "Date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads every season file from `data_dir` and concatenates them.
///
/// Any file that is missing or malformed aborts the whole load.
pub fn load_seasons(data_dir: &Path, season_files: &[String]) -> Result<Vec<GameRecord>, LoadError> {
    if season_files.is_empty() {
        return Err(LoadError::NoSeasons);
    }

    let mut all_games = Vec::new();
    for file_name in season_files {
        let games = load_season_file(&data_dir.join(file_name))?;
        all_games.extend(games);
    }

    info!(
        "Loaded {} games from {} season files",
        all_games.len(),
        season_files.len()
    );
    Ok(all_games)
}

/// Loads one season file, tagging rows with the season from its name.
pub fn load_season_file(path: &Path) -> Result<Vec<GameRecord>, LoadError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoadError::InvalidFileName(path.display().to_string()))?;
    let season = season_from_file_name(file_name)?;

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let games = load_season_from_reader(file, &season, path)?;

    info!("Season {}: {} games from {}", season, games.len(), path.display());
    Ok(games)
}

/// Extracts the season token: `curry_2021-22_reg_season.csv` -> `2021-22`.
pub fn season_from_file_name(file_name: &str) -> Result<String, LoadError> {
    let parts: Vec<&str> = file_name.split('_').collect();
    match parts.as_slice() {
        [prefix, season, _suffix, ..] if !prefix.is_empty() && !season.is_empty() => {
            Ok((*season).to_string())
        }
        _ => Err(LoadError::InvalidFileName(file_name.to_string())),
    }
}

/// Column positions resolved from a header row.
struct Layout {
    opponent: usize,
    date: Option<usize>,
    stats: [usize; Stat::COUNT],
}

impl Layout {
    fn from_headers(headers: &csv::StringRecord, origin: &Path) -> Result<Self, LoadError> {
        let position = |column: &str| headers.iter().position(|h| h.trim() == column);
        let missing = |column: &str| LoadError::MissingColumn {
            path: origin.display().to_string(),
            column: column.to_string(),
        };

        let opponent = position(OPPONENT_COLUMN).ok_or_else(|| missing(OPPONENT_COLUMN))?;
        let mut stats = [0; Stat::COUNT];
        for stat in Stat::ALL {
            stats[stat.index()] = position(stat.column()).ok_or_else(|| missing(stat.column()))?;
        }

        Ok(Self {
            opponent,
            date: position(DATE_COLUMN),
            stats,
        })
    }

    fn is_descriptive(&self, index: usize) -> bool {
        index != self.opponent && Some(index) != self.date && !self.stats.contains(&index)
    }
}

/// Parses one season from any reader. `origin` is only used in error messages.
pub fn load_season_from_reader<R: Read>(
    rdr: R,
    season: &str,
    origin: &Path,
) -> Result<Vec<GameRecord>, LoadError> {
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: origin.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let layout = Layout::from_headers(&headers, origin)?;

    let mut games = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() > headers.len() {
            return Err(LoadError::RowWidth {
                path: origin.display().to_string(),
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!("Dropping empty row at line {} of {}", line, origin.display());
            continue;
        }

        games.push(build_record(&record, &headers, &layout, season));
    }

    Ok(games)
}

fn build_record(
    record: &csv::StringRecord,
    headers: &csv::StringRecord,
    layout: &Layout,
    season: &str,
) -> GameRecord {
    // Short rows are padded with empty cells.
    let cell = |index: usize| record.get(index).filter(|value| !value.trim().is_empty());

    let opponent = cell(layout.opponent).map(normalize_opponent);
    let mut game = GameRecord::new(season, opponent);

    game.date = layout
        .date
        .and_then(|index| cell(index))
        .and_then(|value| NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok());

    for stat in Stat::ALL {
        game.set_raw(stat, cell(layout.stats[stat.index()]).map(str::to_string));
    }

    game.details = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| layout.is_descriptive(*index))
        .map(|(index, header)| {
            (
                header.to_string(),
                record.get(index).unwrap_or_default().to_string(),
            )
        })
        .collect();

    game
}
