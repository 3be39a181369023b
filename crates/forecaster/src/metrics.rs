use ndarray::{Array2, Axis};
use serde::Serialize;
use smartcore::metrics::{mean_absolute_error, mean_squared_error};

/// Held-out error of the forecaster next to a predict-the-mean baseline.
///
/// Errors are averaged over every test cell, i.e. uniformly across targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub rmse: f64,
    pub mae: f64,
    pub baseline_rmse: f64,
    pub baseline_mae: f64,
}

pub fn evaluate(
    y_train: &Array2<f64>,
    y_test: &Array2<f64>,
    predictions: &Array2<f64>,
) -> EvaluationReport {
    let baseline = mean_baseline(y_train, y_test.nrows());

    EvaluationReport {
        train_rows: y_train.nrows(),
        test_rows: y_test.nrows(),
        rmse: rmse(y_test, predictions),
        mae: mae(y_test, predictions),
        baseline_rmse: rmse(y_test, &baseline),
        baseline_mae: mae(y_test, &baseline),
    }
}

/// The per-target training mean repeated for `rows` rows.
fn mean_baseline(y_train: &Array2<f64>, rows: usize) -> Array2<f64> {
    let means = y_train
        .mean_axis(Axis(0))
        .unwrap_or_else(|| ndarray::Array1::zeros(y_train.ncols()));
    Array2::from_shape_fn((rows, means.len()), |(_, j)| means[j])
}

fn flatten(matrix: &Array2<f64>) -> Vec<f64> {
    matrix.iter().copied().collect()
}

fn rmse(actual: &Array2<f64>, predicted: &Array2<f64>) -> f64 {
    mean_squared_error(&flatten(actual), &flatten(predicted)).sqrt()
}

fn mae(actual: &Array2<f64>, predicted: &Array2<f64>) -> f64 {
    mean_absolute_error(&flatten(actual), &flatten(predicted))
}
