use crate::error::ForecastError;
use configuration::ModelSettings;
use ndarray::Array2;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Multi-output regression: one random forest per target column, all
/// trained on the same features with the same parameters.
pub struct MultiTargetForest {
    forests: Vec<Forest>,
}

impl MultiTargetForest {
    pub fn fit(
        features: &Array2<f64>,
        targets: &Array2<f64>,
        settings: &ModelSettings,
    ) -> Result<Self, ForecastError> {
        let x = to_dense(features)?;
        let params = forest_parameters(settings);

        let forests = targets
            .columns()
            .into_iter()
            .enumerate()
            .map(|(j, column)| {
                debug!("Fitting forest for target {} on {} rows", j, column.len());
                Forest::fit(&x, &column.to_vec(), params.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { forests })
    }

    /// Predicts every target for every row; one output column per target.
    pub fn predict(&self, features: &Array2<f64>) -> Result<Array2<f64>, ForecastError> {
        let x = to_dense(features)?;
        let mut predictions = Array2::zeros((features.nrows(), self.forests.len()));

        for (j, forest) in self.forests.iter().enumerate() {
            let column = forest.predict(&x)?;
            for (i, value) in column.into_iter().enumerate() {
                predictions[[i, j]] = value;
            }
        }

        Ok(predictions)
    }

    pub fn n_targets(&self) -> usize {
        self.forests.len()
    }
}

fn forest_parameters(settings: &ModelSettings) -> RandomForestRegressorParameters {
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(settings.n_trees)
        .with_min_samples_leaf(settings.min_samples_leaf)
        .with_min_samples_split(settings.min_samples_split)
        .with_seed(settings.seed);

    match settings.max_depth {
        Some(depth) => params.with_max_depth(depth),
        None => params,
    }
}

fn to_dense(matrix: &Array2<f64>) -> Result<DenseMatrix<f64>, ForecastError> {
    // Logical (row-major) order regardless of the array's memory layout.
    let values: Vec<f64> = matrix.iter().copied().collect();
    Ok(DenseMatrix::new(matrix.nrows(), matrix.ncols(), values, false)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_one_forest_per_target() {
        let features = Array2::from_shape_fn((12, 2), |(i, j)| (i * (j + 1)) as f64);
        let targets = Array2::from_shape_fn((12, 3), |(i, j)| (i + j) as f64);
        let settings = ModelSettings {
            n_trees: 10,
            ..ModelSettings::default()
        };

        let model = MultiTargetForest::fit(&features, &targets, &settings).unwrap();
        assert_eq!(model.n_targets(), 3);

        let predictions = model.predict(&features).unwrap();
        assert_eq!(predictions.dim(), (12, 3));
        for value in predictions.iter() {
            assert!(value.is_finite());
            assert!((0.0..=13.0).contains(value));
        }
    }
}
