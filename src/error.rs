//! Error taxonomy for the agent registry.

use crate::types::AgentId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dot-path of the offending field; empty for the body itself
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Agent not found: {0}")]
    NotFound(AgentId),

    #[error("Validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApiError::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
