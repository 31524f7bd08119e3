use super::EngineConfig;
use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load configuration from an optional TOML file, then apply environment overrides
///
/// Without a path the defaults are used. The result is validated.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => {
            debug!("Loading engine configuration from {}", path.display());
            let content = fs::read_to_string(path)?;
            EngineConfig::from_toml_str(&content)?
        }
        None => EngineConfig::default(),
    };

    config.merge_env_vars()?;
    config.validate()?;
    Ok(config)
}
