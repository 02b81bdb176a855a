//! File source: explicit path, or optional `agentd.toml` in the working directory.
//!
//! Format follows the file extension (TOML, JSON, YAML).

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "agentd";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
    };
    Ok(builder)
}
