//! Error types for taxdesk.

use std::collections::BTreeMap;

use serde::Serialize;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("failed to read settings file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse settings file '{path}': {reason}")]
    Parse { path: String, reason: String },
}

/// Record store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid seed data: {reason}")]
    Seed { reason: String },
}

/// A tax identifier failed its format rule. Carries the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidIdentifier(pub &'static str);

/// Per-field validation failures, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed: {}", self.summary())]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`. The first message for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Failures reported by the address and company lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("lookup query is empty")]
    EmptyQuery,

    #[error("no record found for '{query}'")]
    NotFound { query: String },

    #[error("lookup response superseded by a newer request")]
    Superseded,
}

/// A form payload did not have the expected shape at all.
///
/// Well-typed UI input never produces this; it marks a caller bug.
#[derive(Debug, thiserror::Error)]
#[error("malformed {form} payload: {reason}")]
pub struct FormShapeError {
    pub form: &'static str,
    pub reason: String,
}

/// Errors surfaced by the practice services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("workload window must be between 1 and {max} months, got {months}")]
    WorkloadWindow { months: u32, max: u32 },
}
