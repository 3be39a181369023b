use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown statistic column '{0}'")]
    UnknownStat(String),
}
