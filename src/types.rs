//! Core types shared across the agent registry.

use chrono::{DateTime, SubsecRound, Utc};

/// AgentId: Opaque identifier assigned to an agent record on creation
pub type AgentId = String;

/// Timestamp: UTC instant truncated to millisecond precision
pub type Timestamp = DateTime<Utc>;

/// Current time at the precision records are stamped with.
pub fn now_millis() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Serde adapter writing timestamps as RFC 3339 with millisecond precision.
pub mod millis_rfc3339 {
    use super::Timestamp;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
