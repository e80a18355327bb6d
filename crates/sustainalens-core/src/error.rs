use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Schema,
    Validation,
}

/// Per-record failure. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("schema error: missing required field `{field}`")]
    Schema { field: &'static str },

    #[error("validation error: `{field}` {reason}")]
    Validation { field: String, reason: String },
}

impl ScoringError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Schema { field } => field,
            Self::Validation { field, .. } => field.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("composite weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("composite weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },

    #[error("could not parse composite weights: {0}")]
    Parse(String),
}
