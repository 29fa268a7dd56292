use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisConfig, LoggingConfig};

/// Prefix of the environment variables that override file settings,
/// e.g. `WEEKLY_REPORT__ANALYSIS__MIN_DAYS_PER_WEEK=5`.
pub const ENV_PREFIX: &str = "WEEKLY_REPORT";

/// Loads the application configuration.
///
/// Built-in defaults are overlaid by the optional TOML file at `path` and then by
/// `WEEKLY_REPORT__*` environment variables. The result is validated before it is
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    let builder = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Parses a configuration from TOML text, without consulting the environment.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

/// Rejects settings the engine cannot honour.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let min_days = config.analysis.min_days_per_week;
    if !(1..=5).contains(&min_days) {
        return Err(ConfigError::ValidationError(format!(
            "analysis.min_days_per_week must be between 1 and 5, got {}",
            min_days
        )));
    }
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.level must not be empty".to_string(),
        ));
    }
    Ok(())
}
