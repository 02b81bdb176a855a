//! Property agent domain
//!
//! Record shape, request validation, the store port, and the command service
//! that ties them together.

pub mod commands;
pub mod domain;
pub mod repository;

pub use commands::{AgentCommandService, AgentRemoveResult};
pub use domain::{AgentDraft, AgentPatch, AgentRecord, AgentRules, RuleSet};
pub use repository::{AgentStore, InMemoryAgentStore};
