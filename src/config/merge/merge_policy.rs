//! Base layer of built-in defaults every load starts from.

use crate::config::{DEFAULT_BODY_LIMIT_BYTES, DEFAULT_HOST, DEFAULT_PORT};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("server.body_limit_bytes", DEFAULT_BODY_LIMIT_BYTES as u64)
}
