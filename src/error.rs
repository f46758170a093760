//! Error types shared by the boundary layers.
//!
//! The trace core itself is infallible for text input; these errors describe
//! what can go wrong before a snippet reaches it.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// A language identifier outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("Invalid language value: {0}")]
    Unsupported(String),
}

/// Field-keyed request validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{field}={message}"))
            .collect();
        write!(f, "Validation failed: {{{}}}", entries.join(", "))
    }
}

impl std::error::Error for ValidationError {}
