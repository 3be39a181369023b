use crate::error::ForecastError;
use core_types::{DerivedOpponentMetrics, FEATURE_NAMES, normalize_opponent};
use ndarray::{Array2, Axis};
use polars::prelude::*;
use tracing::{debug, warn};

/// The complete rows of the ranked table as a numeric matrix.
///
/// Row `i` of `features` belongs to `opponents[i]`. Columns follow
/// [`FEATURE_NAMES`]; the same matrix serves as the regression targets.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub opponents: Vec<String>,
    pub features: Array2<f64>,
}

impl Dataset {
    /// Drops rows with any missing value, then assembles the matrix.
    pub fn from_ranking(ranking: &[DerivedOpponentMetrics]) -> Result<Self, ForecastError> {
        let complete: Vec<&DerivedOpponentMetrics> = ranking
            .iter()
            .filter(|row| {
                if !row.is_complete() {
                    warn!("Dropping {} from the model inputs: incomplete averages", row.opponent);
                }
                row.is_complete()
            })
            .collect();

        let features = if complete.is_empty() {
            Array2::zeros((0, FEATURE_NAMES.len()))
        } else {
            let frame = feature_frame(&complete)?;
            debug!("Feature frame shape: {:?}", frame.shape());
            frame.to_ndarray::<Float64Type>(IndexOrder::C)?
        };

        Ok(Self {
            opponents: complete.iter().map(|row| row.opponent.clone()).collect(),
            features,
        })
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    /// Row index for an opponent code; case-insensitive, aliases resolved.
    pub fn position(&self, opponent: &str) -> Option<usize> {
        let code = normalize_opponent(&opponent.to_ascii_uppercase());
        self.opponents.iter().position(|candidate| *candidate == code)
    }

    /// The given rows, in the given order.
    pub fn rows(&self, indices: &[usize]) -> Array2<f64> {
        self.features.select(Axis(0), indices)
    }
}

/// One `Float64` column per feature name.
pub fn feature_frame(rows: &[&DerivedOpponentMetrics]) -> PolarsResult<DataFrame> {
    let columns = FEATURE_NAMES
        .into_iter()
        .enumerate()
        .map(|(j, name)| {
            let values: Vec<Option<f64>> = rows.iter().map(|row| row.features()[j]).collect();
            Series::new(name, values)
        })
        .collect::<Vec<Series>>();

    DataFrame::new(columns)
}
