use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read season file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Season file {path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    #[error("Row {line} of {path} has {found} fields, expected at most {expected}")]
    RowWidth {
        path: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Cannot read a season from file name '{0}' (expected <player>_<season>_<suffix>)")]
    InvalidFileName(String),

    #[error("No season files were given")]
    NoSeasons,
}
