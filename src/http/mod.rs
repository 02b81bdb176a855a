//! HTTP surface
//!
//! Routes `/agents` verbs onto [`AgentCommandService`]. Handlers only extract
//! and shape; all rules live in the service.

pub mod handlers;
pub mod response;

use crate::agent::{AgentCommandService, AgentStore, InMemoryAgentStore};
use crate::config::ServiceConfig;
use crate::error::ApiError;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
pub struct AppState {
    pub agents: AgentCommandService,
}

impl AppState {
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self {
            agents: AgentCommandService::new(store),
        }
    }

    /// Fresh in-memory state with the configured seed agents inserted.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ApiError> {
        let state = Self::new(Arc::new(InMemoryAgentStore::new()));
        let bodies: Vec<_> = config.seed_agents.iter().map(|s| s.to_body()).collect();
        let seeded = state.agents.seed(&bodies)?;
        if !seeded.is_empty() {
            info!(count = seeded.len(), "Seeded agents");
        }
        Ok(state)
    }
}

pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health))
        .route(
            "/agents",
            get(handlers::list_agents).post(handlers::create_agent),
        )
        .route(
            "/agents/:id",
            get(handlers::get_agent)
                .put(handlers::update_agent)
                .delete(handlers::delete_agent),
        )
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(response::panic_response))
        .with_state(state)
}
