use crate::agent::domain::AgentRecord;
use crate::types::AgentId;

/// Key-value store owning every agent record.
///
/// Each call is atomic on its own; nothing spans calls. Absence is a return
/// value, never an error.
pub trait AgentStore: Send + Sync {
    fn get(&self, id: &AgentId) -> Option<AgentRecord>;
    /// All records, in no particular order.
    fn list(&self) -> Vec<AgentRecord>;
    /// Insert or overwrite wholesale.
    fn set(&self, id: &AgentId, record: AgentRecord);
    /// Returns whether a record existed.
    fn delete(&self, id: &AgentId) -> bool;
}
