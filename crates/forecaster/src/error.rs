use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Not enough data to train a forecaster: {0}")]
    NotEnoughData(String),

    #[error("Model error: {0}")]
    Model(#[from] smartcore::error::Failed),

    #[error("Feature frame error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),

    #[error("Scaler error: {0}")]
    Scaler(String),
}
