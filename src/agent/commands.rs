//! Agent command service: one entry point per agent operation.
//!
//! Owns the workflow (validate, check existence, stamp, store); the HTTP layer
//! extracts requests and shapes responses around it.

use crate::agent::domain::{AgentRecord, AgentRules};
use crate::agent::repository::AgentStore;
use crate::concurrency::AgentLockManager;
use crate::error::ApiError;
use crate::types::{now_millis, AgentId};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Result of agent remove command.
#[derive(Debug, Clone)]
pub struct AgentRemoveResult {
    pub agent_id: AgentId,
    pub full_name: String,
}

pub struct AgentCommandService {
    store: Arc<dyn AgentStore>,
    rules: AgentRules,
    locks: AgentLockManager,
}

impl AgentCommandService {
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self::with_rules(store, AgentRules::new())
    }

    pub fn with_rules(store: Arc<dyn AgentStore>, rules: AgentRules) -> Self {
        Self {
            store,
            rules,
            locks: AgentLockManager::new(),
        }
    }

    /// List every stored agent.
    pub fn list(&self) -> Vec<AgentRecord> {
        self.store.list()
    }

    /// Show one agent.
    pub fn get(&self, agent_id: &AgentId) -> Result<AgentRecord, ApiError> {
        self.store
            .get(agent_id)
            .ok_or_else(|| ApiError::NotFound(agent_id.clone()))
    }

    /// Create an agent from a raw request body.
    pub fn create(&self, body: &Value) -> Result<AgentRecord, ApiError> {
        let draft = self.rules.parse_create(body).inspect_err(|e| {
            debug!(errors = e.field_errors().len(), "Agent create rejected");
        })?;

        let agent_id = Uuid::new_v4().to_string();
        let record = AgentRecord::new(agent_id.clone(), draft, now_millis());
        self.store.set(&agent_id, record.clone());

        info!(agent_id = %agent_id, "Agent created");
        Ok(record)
    }

    /// Merge a partial body over an existing agent.
    ///
    /// The body is validated before the store is consulted, so a request that
    /// is both invalid and aimed at a missing agent reports the validation
    /// errors.
    pub fn update(&self, agent_id: &AgentId, body: &Value) -> Result<AgentRecord, ApiError> {
        let patch = self.rules.parse_update(body).inspect_err(|e| {
            debug!(
                agent_id = %agent_id,
                errors = e.field_errors().len(),
                "Agent update rejected"
            );
        })?;

        // Unknown ids never get a lock entry
        self.get(agent_id)?;

        let lock = self.locks.get_lock(agent_id);
        let updated = {
            let _guard = lock.lock();
            self.get(agent_id).map(|mut record| {
                record.apply(patch, now_millis());
                self.store.set(agent_id, record.clone());
                record
            })
        };

        // Removed while we waited for the lock
        let record = updated.inspect_err(|_| self.locks.forget(agent_id))?;

        info!(agent_id = %agent_id, name = %record.full_name(), "Agent updated");
        Ok(record)
    }

    /// Remove an agent.
    pub fn remove(&self, agent_id: &AgentId) -> Result<AgentRemoveResult, ApiError> {
        let record = self.get(agent_id)?;

        let lock = self.locks.get_lock(agent_id);
        let existed = {
            let _guard = lock.lock();
            self.store.delete(agent_id)
        };
        self.locks.forget(agent_id);

        if !existed {
            return Err(ApiError::NotFound(agent_id.clone()));
        }

        let result = AgentRemoveResult {
            agent_id: agent_id.clone(),
            full_name: record.full_name(),
        };
        info!(agent_id = %agent_id, name = %result.full_name, "Agent removed");
        Ok(result)
    }

    /// Insert startup agents through the create pipeline.
    ///
    /// Every body is checked before anything is stored; the first invalid one
    /// fails the whole batch.
    pub fn seed(&self, bodies: &[Value]) -> Result<Vec<AgentRecord>, ApiError> {
        for (index, body) in bodies.iter().enumerate() {
            if let Err(errors) = self.rules.create().validate(body) {
                let detail = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.path, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(ApiError::ConfigError(format!(
                    "Seed agent #{} is invalid: {}",
                    index + 1,
                    detail
                )));
            }
        }
        bodies.iter().map(|body| self.create(body)).collect()
    }
}
