use std::fmt;

use shadesync_api::Channel;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Schema violation: {}", join_violations(.0))]
    SchemaViolation(Vec<FieldViolation>),

    #[error("No blind configured for channel {0}")]
    ConfigNotFound(Channel),
}

impl EngineError {
    /// Violated fields, empty for anything but a schema violation
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            EngineError::SchemaViolation(violations) => violations,
            _ => &[],
        }
    }
}

/// A single rejected field and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
