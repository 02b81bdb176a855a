use super::AppState;
use crate::agent::AgentRecord;
use crate::error::{ApiError, FieldError};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub const WELCOME: &str = "Welcome to the Property System API!";

pub async fn welcome() -> &'static str {
    WELCOME
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<AgentRecord>> {
    Json(state.agents.list())
}

pub async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AgentRecord>, ApiError> {
    state.agents.get(&id).map(Json)
}

pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<AgentRecord>), ApiError> {
    let body = parse_body(&body)?;
    let record = state.agents.create(&body)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<AgentRecord>, ApiError> {
    let body = parse_body(&body)?;
    state.agents.update(&id, &body).map(Json)
}

pub async fn delete_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.agents.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Decode a request body; blank means `{}`.
///
/// Malformed JSON is the caller's mistake, so it is reported like any other
/// validation failure.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| {
        ApiError::ValidationFailed(vec![FieldError::new(
            "",
            format!("Malformed JSON body: {}", e),
        )])
    })
}
