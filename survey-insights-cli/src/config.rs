use anyhow::{Context, Result};
use config::{Config as ConfigLoader, Environment, File};
use std::path::Path;
use survey_insights_core::EngineConfig;

/// Prefix for environment overrides, e.g. `SURVEY_INSIGHTS__TEXT__MAX_THEMES=10`.
pub const ENV_PREFIX: &str = "SURVEY_INSIGHTS";

/// Load `config/default` and `config/local` from the working directory, then the environment.
pub fn load() -> Result<EngineConfig> {
    load_from(Path::new("."), ENV_PREFIX)
}

/// Layered engine configuration rooted at `base_dir`. Missing files fall back to defaults.
pub fn load_from(base_dir: &Path, env_prefix: &str) -> Result<EngineConfig> {
    let settings = ConfigLoader::builder()
        .add_source(File::from(base_dir.join("config/default")).required(false))
        .add_source(File::from(base_dir.join("config/local")).required(false))
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read configuration")?;

    let config: EngineConfig = settings
        .try_deserialize()
        .context("failed to parse configuration")?;
    config.validated().context("invalid configuration")
}
