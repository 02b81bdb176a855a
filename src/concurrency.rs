//! Per-agent mutation locks
//!
//! Reads go straight to the store. Update and delete take the lock for their
//! agent so that a read-merge-write can never interleave with a removal of
//! the same record. Different agents never block each other.

use crate::types::AgentId;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

pub struct AgentLockManager {
    locks: RwLock<HashMap<AgentId, Arc<Mutex<()>>>>,
}

impl AgentLockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the lock for an agent.
    pub fn get_lock(&self, agent_id: &AgentId) -> Arc<Mutex<()>> {
        {
            let map = self.locks.read();
            if let Some(lock) = map.get(agent_id) {
                return lock.clone();
            }
        }

        // Re-check under the write lock; another thread may have inserted it
        let mut map = self.locks.write();
        map.entry(agent_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the entry for a deleted agent. Identifiers are never reused, so
    /// nobody will ask for it again.
    pub fn forget(&self, agent_id: &AgentId) {
        self.locks.write().remove(agent_id);
    }

    pub fn tracked(&self) -> usize {
        self.locks.read().len()
    }
}

impl Default for AgentLockManager {
    fn default() -> Self {
        Self::new()
    }
}
