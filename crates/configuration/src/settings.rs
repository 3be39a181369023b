use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub model: ModelSettings,
    pub logging: LoggingSettings,
}

/// Where the season files live and which ones make up a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding the season files. Relative paths are resolved
    /// against the directory of the config file.
    pub directory: PathBuf,
    /// File names in load order, each `<player>_<season>_<suffix>`.
    pub season_files: Vec<String>,
}

/// Parameters for the random-forest forecaster and its train/test split.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub min_samples_leaf: usize,
    pub min_samples_split: usize,
    /// Fraction of complete opponent rows held out for evaluation.
    pub test_size: f64,
    /// Seeds both the split shuffle and the forest.
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These allow a user to omit any section (or the whole file).

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            season_files: vec![
                "curry_2021-22_reg_season.csv".to_string(),
                "curry_2022-23_reg_season.csv".to_string(),
                "curry_2023-24_reg_season.csv".to_string(),
                "curry_2024-25_reg_season.csv".to_string(),
            ],
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_leaf: 1,
            min_samples_split: 2,
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "courtside.log".to_string(),
        }
    }
}

impl Settings {
    /// Makes relative data and log directories relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.data.directory.is_relative() {
            self.data.directory = base.join(&self.data.directory);
        }
        if let Some(dir) = self.logging.directory.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.season_files.is_empty() {
            return Err(ConfigError::ValidationError(
                "data.season_files must list at least one file".to_string(),
            ));
        }
        if !(self.model.test_size > 0.0 && self.model.test_size < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "model.test_size must be between 0 and 1 (exclusive), got {}",
                self.model.test_size
            )));
        }
        if self.model.n_trees == 0 {
            return Err(ConfigError::ValidationError(
                "model.n_trees must be at least 1".to_string(),
            ));
        }
        if self.model.min_samples_split < 2 {
            return Err(ConfigError::ValidationError(
                "model.min_samples_split must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_season_list_is_rejected() {
        let mut settings = Settings::default();
        settings.data.season_files.clear();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_directories() {
        let mut settings = Settings::default();
        settings.data.directory = PathBuf::from("/var/lib/courtside");
        settings.logging.directory = Some(PathBuf::from("logs"));
        settings.resolve_paths(Path::new("/etc/courtside"));

        assert_eq!(settings.data.directory, PathBuf::from("/var/lib/courtside"));
        assert_eq!(
            settings.logging.directory,
            Some(PathBuf::from("/etc/courtside/logs"))
        );
    }
}
