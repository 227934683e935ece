use crate::error::ConfigError;
use crate::settings::Settings;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DataSettings, LogLevel, LoggingSettings, ServerSettings};

/// Prefix of environment variables that override file settings,
/// e.g. `PRICEDASH__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "PRICEDASH";

/// Values given on the command line. They take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub log_level: Option<LogLevel>,
}

/// Loads the application configuration.
///
/// Reads the TOML file at `path` (optional, so the whole configuration can
/// come from the environment or the command line), layers `PRICEDASH__*`
/// environment variables and then `overrides` on top, deserializes into our
/// strongly-typed `Settings` struct and validates it.
pub fn load_config(path: &Path, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option(
            "data.path",
            overrides
                .data_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )?
        .set_override_option("server.port", overrides.port.map(i64::from))?
        .set_override_option(
            "logging.level",
            overrides.log_level.map(|l| l.as_str().to_string()),
        )?
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    Ok(settings)
}

/// Loads the configuration from TOML text, without environment overrides.
pub fn load_config_from_str(contents: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Toml))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.data.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.path must not be empty".to_string(),
        ));
    }
    if settings.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
