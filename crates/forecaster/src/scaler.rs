use crate::error::ForecastError;
use ndarray::Array2;

/// Standardizes each feature to zero mean and unit variance.
///
/// Fitted on the training rows only, then applied unchanged to test and
/// inference rows. Uses the population standard deviation; a constant
/// feature is divided by 1 instead of 0.
#[derive(Debug, Clone, Default)]
pub struct FeatureScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
    fitted: bool,
}

impl FeatureScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, data: &Array2<f64>) -> Result<(), ForecastError> {
        let (n_samples, n_features) = data.dim();
        if n_samples == 0 {
            return Err(ForecastError::Scaler(
                "cannot fit on an empty matrix".to_string(),
            ));
        }
        self.means = vec![0.0; n_features];
        self.stds = vec![0.0; n_features];

        for j in 0..n_features {
            let column = data.column(j);
            let mean = column.sum() / n_samples as f64;
            let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n_samples as f64;

            self.means[j] = mean;
            self.stds[j] = if variance.sqrt() < 1e-10 {
                1.0
            } else {
                variance.sqrt()
            };
        }

        self.fitted = true;
        Ok(())
    }

    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, ForecastError> {
        if !self.fitted {
            return Err(ForecastError::Scaler(
                "scaler must be fitted before transform".to_string(),
            ));
        }

        let (n_samples, n_features) = data.dim();
        if n_features != self.means.len() {
            return Err(ForecastError::Scaler(format!(
                "feature count mismatch: expected {}, got {}",
                self.means.len(),
                n_features
            )));
        }

        Ok(Array2::from_shape_fn((n_samples, n_features), |(i, j)| {
            (data[[i, j]] - self.means[j]) / self.stds[j]
        }))
    }

    pub fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>, ForecastError> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standardizes_columns() {
        let data = array![[1.0, 10.0], [2.0, 10.0], [3.0, 10.0]];
        let mut scaler = FeatureScaler::new();
        let scaled = scaler.fit_transform(&data).unwrap();

        assert_eq!(scaler.means(), &[2.0, 10.0]);
        let expected_std = (2.0f64 / 3.0).sqrt();
        assert!((scaler.stds()[0] - expected_std).abs() < 1e-12);
        // Constant column scales by 1.
        assert_eq!(scaler.stds()[1], 1.0);

        assert!((scaled[[0, 0]] + 1.0 / expected_std).abs() < 1e-12);
        assert!(scaled[[1, 0]].abs() < 1e-12);
        assert!(scaled.column(1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_applies_training_statistics_to_new_rows() {
        let mut scaler = FeatureScaler::new();
        scaler.fit(&array![[0.0], [2.0]]).unwrap();

        let scaled = scaler.transform(&array![[4.0]]).unwrap();
        assert!((scaled[[0, 0]] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_misuse() {
        let scaler = FeatureScaler::new();
        assert!(matches!(
            scaler.transform(&array![[1.0]]),
            Err(ForecastError::Scaler(_))
        ));

        let mut scaler = FeatureScaler::new();
        scaler.fit(&array![[1.0, 2.0]]).unwrap();
        assert!(matches!(
            scaler.transform(&array![[1.0]]),
            Err(ForecastError::Scaler(_))
        ));
    }
}
