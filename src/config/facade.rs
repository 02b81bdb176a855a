//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ServiceConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `agentd.toml` in the working directory (if present) and environment.
    pub fn load() -> Result<ServiceConfig, ConfigError> {
        MergeService::load(None)
    }

    /// Load configuration from a specific file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
        MergeService::load(Some(path))
    }

    /// Create default configuration.
    pub fn default() -> ServiceConfig {
        ServiceConfig::default()
    }
}
