//! Error types and the per-field error store.

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by form-state operations.
///
/// These describe misuse of the API or a broken field configuration.
/// A value that simply fails one of its rules is not an error: its message
/// is recorded in the [`ErrorStore`] instead.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field was registered without an identifier.
    #[error("field declaration is missing an id")]
    MissingIdentifier,

    /// An operation referenced a field that was never registered.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A declared rule name matches neither the field's custom rules nor the
    /// built-in catalog.
    #[error("field {field} declares unknown rule {rule:?}")]
    UnresolvedRule { field: String, rule: String },

    /// A custom rule pattern failed to compile.
    #[error("invalid pattern for rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// A declarative form definition could not be parsed.
    #[error("failed to parse form definition: {0}")]
    Definition(#[from] serde_json::Error),
}

/// Result type alias for form-state operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Latest validation message per field.
///
/// An empty message means the field passed validation the last time it was
/// checked. Fields that were never validated have no entry; reading them
/// yields the empty string as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorStore {
    errors: HashMap<String, String>,
}

impl ErrorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest message for a field, replacing any previous one.
    pub(crate) fn set(&mut self, id: &str, message: impl Into<String>) {
        self.errors.insert(id.to_string(), message.into());
    }

    /// Returns the message for a field, or `""` when there is none.
    #[must_use]
    pub fn get(&self, id: &str) -> &str {
        self.errors.get(id).map_or("", String::as_str)
    }

    /// Returns whether a field has ever been validated.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.errors.contains_key(id)
    }

    /// Returns whether no field currently carries a non-empty message.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.values().all(String::is_empty)
    }

    /// Returns the number of validated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns whether no field has been validated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the fields that currently carry a non-empty message.
    pub fn failing(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(id, message)| (id.as_str(), message.as_str()))
    }

    /// Returns the underlying map of all recorded messages.
    #[must_use]
    pub const fn as_map(&self) -> &HashMap<String, String> {
        &self.errors
    }
}

impl std::fmt::Display for ErrorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut failing: Vec<_> = self.failing().collect();
        failing.sort_unstable();
        for (id, message) in failing {
            writeln!(f, "{id}: {message}")?;
        }
        Ok(())
    }
}
