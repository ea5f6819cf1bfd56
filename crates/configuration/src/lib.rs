use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    AnalyzerConfig, AnalyzerKind, Beams, Collider, Component, ErrorPolicy, IsoArea,
    IsolationParams, Logging, LooperSettings, ParticleFilter, ReaderParams, RecoilBuilderParams,
    ResonanceBuilderParams, RunContext, SelectorParams, Settings,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `HEPFLOW__LOOPER__MAX_EVENTS=100`.
pub const ENV_PREFIX: &str = "HEPFLOW";

/// Loads and validates the analysis configuration from a TOML file.
///
/// Values from `HEPFLOW__*` environment variables take precedence over the file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

/// Parses and validates settings from TOML text, without environment overrides.
pub fn settings_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}
