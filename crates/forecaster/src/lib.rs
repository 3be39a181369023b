//! Per-opponent stat forecasting.
//!
//! Trains a multi-output random forest on the ranked opponent table (the eight
//! averaged and combined columns are both features and targets), reports its
//! held-out error against a mean baseline, and predicts the next per-game
//! averages against a chosen opponent.

use configuration::ModelSettings;
use core_types::{DerivedOpponentMetrics, FEATURE_NAMES};
use ndarray::{Array2, ArrayView1};
use serde::Serialize;
use tracing::info;

pub mod dataset;
pub mod error;
pub mod metrics;
pub mod model;
pub mod scaler;
pub mod split;

pub use dataset::Dataset;
pub use error::ForecastError;
pub use metrics::EvaluationReport;
pub use model::MultiTargetForest;
pub use scaler::FeatureScaler;
pub use split::{Split, train_test_split};

/// Predicted per-game values, one field per model target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatProjection {
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    pub threes: f64,
    pub steals: f64,
    pub blocks: f64,
    pub points_assists: f64,
    pub points_rebounds: f64,
}

impl StatProjection {
    fn from_row(row: ArrayView1<'_, f64>) -> Self {
        let value = |j: usize| row.get(j).copied().unwrap_or(f64::NAN);
        Self {
            points: value(0),
            assists: value(1),
            rebounds: value(2),
            threes: value(3),
            steals: value(4),
            blocks: value(5),
            points_assists: value(6),
            points_rebounds: value(7),
        }
    }

    /// `(column name, value)` pairs in model column order.
    pub fn named_values(&self) -> [(&'static str, f64); 8] {
        let values = [
            self.points,
            self.assists,
            self.rebounds,
            self.threes,
            self.steals,
            self.blocks,
            self.points_assists,
            self.points_rebounds,
        ];
        std::array::from_fn(|j| (FEATURE_NAMES[j], values[j]))
    }
}

/// The result of a successful opponent lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub opponent: String,
    pub projection: StatProjection,
    pub evaluation: EvaluationReport,
    /// Model output for each held-out row, in test order.
    pub test_predictions: Vec<StatProjection>,
}

/// A fitted scaler and forest together with the table they were trained on.
pub struct Forecaster {
    dataset: Dataset,
    scaler: FeatureScaler,
    model: MultiTargetForest,
    evaluation: EvaluationReport,
    test_predictions: Array2<f64>,
}

impl Forecaster {
    /// Splits the complete rows, scales, fits one forest per target and
    /// evaluates on the held-out rows.
    pub fn train(
        ranking: &[DerivedOpponentMetrics],
        settings: &ModelSettings,
    ) -> Result<Self, ForecastError> {
        let dataset = Dataset::from_ranking(ranking)?;
        Self::train_on(dataset, settings)
    }

    fn train_on(dataset: Dataset, settings: &ModelSettings) -> Result<Self, ForecastError> {
        let split = train_test_split(dataset.len(), settings.test_size, settings.seed)?;
        info!(
            "Training on {} opponents, testing on {}",
            split.train.len(),
            split.test.len()
        );

        // Features and targets are the same columns.
        let y_train = dataset.rows(&split.train);
        let y_test = dataset.rows(&split.test);

        let mut scaler = FeatureScaler::new();
        let x_train = scaler.fit_transform(&y_train)?;
        let x_test = scaler.transform(&y_test)?;

        let model = MultiTargetForest::fit(&x_train, &y_train, settings)?;
        let test_predictions = model.predict(&x_test)?;
        let evaluation = metrics::evaluate(&y_train, &y_test, &test_predictions);

        info!("Root Mean Squared Error (RMSE): {:.4}", evaluation.rmse);
        info!("Mean Absolute Error (MAE): {:.4}", evaluation.mae);
        info!("Baseline Root Mean Squared Error (RMSE): {:.4}", evaluation.baseline_rmse);
        info!("Baseline Mean Absolute Error (MAE): {:.4}", evaluation.baseline_mae);

        Ok(Self {
            dataset,
            scaler,
            model,
            evaluation,
            test_predictions,
        })
    }

    pub fn evaluation(&self) -> &EvaluationReport {
        &self.evaluation
    }

    pub fn test_predictions(&self) -> Vec<StatProjection> {
        self.test_predictions
            .rows()
            .into_iter()
            .map(StatProjection::from_row)
            .collect()
    }

    /// Predicts from the opponent's own historical row.
    /// `Ok(None)` when the opponent has no complete row.
    pub fn forecast(&self, opponent: &str) -> Result<Option<StatProjection>, ForecastError> {
        let Some(index) = self.dataset.position(opponent) else {
            return Ok(None);
        };

        let history = self.dataset.rows(&[index]);
        let scaled = self.scaler.transform(&history)?;
        let predicted = self.model.predict(&scaled)?;

        Ok(predicted.rows().into_iter().next().map(StatProjection::from_row))
    }
}

/// Trains a forecaster on `ranking` and predicts against `opponent`.
///
/// Returns `Ok(None)` ("no data") without training anything when the
/// opponent has no complete row in the table.
pub fn predict_future_stats(
    ranking: &[DerivedOpponentMetrics],
    opponent: &str,
    settings: &ModelSettings,
) -> Result<Option<Forecast>, ForecastError> {
    let dataset = Dataset::from_ranking(ranking)?;
    let Some(index) = dataset.position(opponent) else {
        info!("No data for opponent '{}'", opponent);
        return Ok(None);
    };
    let code = dataset.opponents[index].clone();

    let forecaster = Forecaster::train_on(dataset, settings)?;
    let Some(projection) = forecaster.forecast(&code)? else {
        return Ok(None);
    };

    Ok(Some(Forecast {
        opponent: code,
        projection,
        evaluation: forecaster.evaluation().clone(),
        test_predictions: forecaster.test_predictions(),
    }))
}
