pub mod record;
pub mod validation;

pub use record::{AgentDraft, AgentPatch, AgentRecord};
pub use validation::{AgentRules, FieldRule, Format, Presence, RuleSet};
