//! Agent record shape and its mutation rules.

use crate::types::{millis_rfc3339, AgentId, Timestamp};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A property agent as held by the store and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: AgentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Empty when the agent has no mobile number on file
    pub mobile_number: String,
    #[serde(with = "millis_rfc3339")]
    pub created_at: Timestamp,
    #[serde(with = "millis_rfc3339")]
    pub updated_at: Timestamp,
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub mobile_number: String,
}

/// Validated update payload; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
}

impl AgentRecord {
    /// Build a fresh record; both timestamps start at `now`.
    pub fn new(id: AgentId, draft: AgentDraft, now: Timestamp) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            mobile_number: draft.mobile_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overlay the supplied fields and refresh `updated_at`.
    pub fn apply(&mut self, patch: AgentPatch, now: Timestamp) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(mobile_number) = patch.mobile_number {
            self.mobile_number = mobile_number;
        }
        self.touch(now);
    }

    /// Advance `updated_at`, stepping one millisecond past the previous stamp
    /// when the clock has not moved (or moved backwards).
    fn touch(&mut self, now: Timestamp) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
