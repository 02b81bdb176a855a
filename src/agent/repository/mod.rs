//! Agent store port and adapters.

pub mod contract;
pub mod memory;

pub use contract::AgentStore;
pub use memory::InMemoryAgentStore;
