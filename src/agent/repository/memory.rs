//! Process-local store; cleared on restart.

use super::contract::AgentStore;
use crate::agent::domain::AgentRecord;
use crate::types::AgentId;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct InMemoryAgentStore {
    records: RwLock<HashMap<AgentId, AgentRecord>>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AgentStore for InMemoryAgentStore {
    fn get(&self, id: &AgentId) -> Option<AgentRecord> {
        self.records.read().get(id).cloned()
    }

    fn list(&self) -> Vec<AgentRecord> {
        self.records.read().values().cloned().collect()
    }

    fn set(&self, id: &AgentId, record: AgentRecord) {
        self.records.write().insert(id.clone(), record);
    }

    fn delete(&self, id: &AgentId) -> bool {
        self.records.write().remove(id).is_some()
    }
}
