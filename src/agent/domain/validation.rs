//! Declarative request validation for agent payloads.
//!
//! A [`RuleSet`] lists one [`FieldRule`] per accepted field. Create requests are
//! checked against the canonical rule-set; update requests against its
//! [`RuleSet::partial`] transform, so the two can never drift apart.

use super::record::{AgentDraft, AgentPatch};
use crate::error::{ApiError, FieldError};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@(?:[a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9\s]{10,20}$").expect("valid phone regex"));

/// Local part, "@", then a dotted domain ending in a 2+ letter label.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// Leading `+` followed by 10 to 20 digits or spaces. Empty means "no number".
pub fn is_valid_phone(value: &str) -> bool {
    value.is_empty() || PHONE_RE.is_match(value)
}

/// Format constraint applied to a present string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    NonEmpty,
    Email,
    Phone,
}

/// What happens when a field is missing from the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    /// Missing is fine; `default` is written into the output when set
    Optional { default: Option<Value> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    /// Human-readable name used in messages
    pub label: &'static str,
    pub presence: Presence,
    pub format: Format,
}

enum Outcome {
    Skip,
    Keep(Value),
    Reject(String),
}

impl FieldRule {
    pub fn required(field: &'static str, label: &'static str, format: Format) -> Self {
        Self {
            field,
            label,
            presence: Presence::Required,
            format,
        }
    }

    pub fn optional(field: &'static str, label: &'static str, format: Format) -> Self {
        Self {
            field,
            label,
            presence: Presence::Optional { default: None },
            format,
        }
    }

    /// Fill a missing value with `value` instead of leaving it out.
    pub fn or_default(mut self, value: impl Into<Value>) -> Self {
        self.presence = Presence::Optional {
            default: Some(value.into()),
        };
        self
    }

    /// Same rule, skipped entirely when the field is absent.
    pub fn into_partial(self) -> Self {
        Self {
            presence: Presence::Optional { default: None },
            ..self
        }
    }

    fn check(&self, value: Option<&Value>) -> Outcome {
        let value = match (value, &self.presence) {
            (Some(value), _) => value,
            (None, Presence::Required) => {
                return Outcome::Reject(format!("{} is required", self.label))
            }
            (None, Presence::Optional { default: Some(d) }) => return Outcome::Keep(d.clone()),
            (None, Presence::Optional { default: None }) => return Outcome::Skip,
        };

        let Value::String(text) = value else {
            return Outcome::Reject(format!("Expected string, received {}", json_type(value)));
        };

        let message = match self.format {
            Format::NonEmpty if text.is_empty() => Some(format!("{} cannot be empty", self.label)),
            Format::Email if !is_valid_email(text) => Some("A valid email is required".to_string()),
            Format::Phone if !is_valid_phone(text) => {
                Some("Invalid international phone number format.".to_string())
            }
            _ => None,
        };

        match message {
            Some(message) => Outcome::Reject(message),
            None => Outcome::Keep(value.clone()),
        }
    }
}

/// Ordered collection of field rules evaluated in a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Canonical rules for a new agent.
    pub fn agent_create() -> Self {
        Self::new(vec![
            FieldRule::required("firstName", "First name", Format::NonEmpty),
            FieldRule::required("lastName", "Last name", Format::NonEmpty),
            FieldRule::required("email", "Email", Format::Email),
            FieldRule::optional("mobileNumber", "Mobile number", Format::Phone).or_default(""),
        ])
    }

    /// Derive the update-mode variant: every rule optional, formats kept.
    pub fn partial(&self) -> Self {
        Self::new(self.rules.iter().cloned().map(FieldRule::into_partial).collect())
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Check every rule against `body`.
    ///
    /// Returns the declared fields only (unknown keys are dropped), or every
    /// violation in declaration order.
    pub fn validate(&self, body: &Value) -> Result<Map<String, Value>, Vec<FieldError>> {
        let Value::Object(fields) = body else {
            return Err(vec![FieldError::new(
                "",
                format!("Expected object, received {}", json_type(body)),
            )]);
        };

        let mut output = Map::new();
        let mut errors = Vec::new();
        for rule in &self.rules {
            match rule.check(fields.get(rule.field)) {
                Outcome::Skip => {}
                Outcome::Keep(value) => {
                    output.insert(rule.field.to_string(), value);
                }
                Outcome::Reject(message) => errors.push(FieldError::new(rule.field, message)),
            }
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(errors)
        }
    }

    /// Validate and deserialize into the typed payload `T`.
    pub fn parse<T: DeserializeOwned>(&self, body: &Value) -> Result<T, ApiError> {
        let fields = self.validate(body).map_err(ApiError::ValidationFailed)?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| ApiError::Internal(format!("validated payload did not decode: {}", e)))
    }
}

/// Create and update rule-sets for agents, the latter derived from the former.
#[derive(Debug, Clone)]
pub struct AgentRules {
    create: RuleSet,
    update: RuleSet,
}

impl AgentRules {
    pub fn new() -> Self {
        Self::from_create(RuleSet::agent_create())
    }

    pub fn from_create(create: RuleSet) -> Self {
        let update = create.partial();
        Self { create, update }
    }

    pub fn create(&self) -> &RuleSet {
        &self.create
    }

    pub fn update(&self) -> &RuleSet {
        &self.update
    }

    pub fn parse_create(&self, body: &Value) -> Result<AgentDraft, ApiError> {
        self.create.parse(body)
    }

    pub fn parse_update(&self, body: &Value) -> Result<AgentPatch, ApiError> {
        self.update.parse(body)
    }
}

impl Default for AgentRules {
    fn default() -> Self {
        Self::new()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
