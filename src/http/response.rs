//! Error envelopes: `{ message }` for not-found and internal faults,
//! `{ errors: [{ path, message }] }` for validation failures.

use crate::error::{ApiError, FieldError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{debug, error};

pub const NOT_FOUND_MESSAGE: &str = "Agent not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsBody {
    pub errors: Vec<FieldError>,
}

fn message(status: StatusCode, message: &str) -> Response {
    let body = MessageBody {
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(agent_id) => {
                debug!(agent_id = %agent_id, "Agent not found");
                message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            ApiError::ValidationFailed(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
            }
            other => {
                error!(error = %other, "Request failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

/// Turn a handler panic into the generic 500 without leaking its payload.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = %detail, "Handler panicked");
    message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
