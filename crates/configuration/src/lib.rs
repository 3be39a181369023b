use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DataSettings, LoggingSettings, ModelSettings, Settings};

/// Environment variables with this prefix override file values,
/// e.g. `COURTSIDE__MODEL__SEED=7`.
pub const ENV_PREFIX: &str = "COURTSIDE";

/// Loads the application configuration from `path`.
///
/// The file is optional; every key has a default. Environment variables are
/// layered on top, then relative paths are resolved against the directory that
/// holds the file and the result is validated.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    load_config_with_env(path, environment())
}

/// The `COURTSIDE__SECTION__KEY` environment source.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_config_with_env(
    path: &Path,
    env: config::Environment,
) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let mut settings = builder.try_deserialize::<Settings>()?;
    if let Some(base) = path.parent() {
        settings.resolve_paths(base);
    }
    settings.validate()?;

    Ok(settings)
}
