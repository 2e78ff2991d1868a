//! Error type shared by the record store, hierarchy index and record sources.
//!
//! Every variant carries a human-readable message plus structured `details`
//! so callers can log or display the offending codes, guids and languages
//! without parsing strings.

use serde::Serialize;
use serde_json::Value;

/// Errors raised while constructing or querying a taxonomy.
///
/// Structural variants ([`Validation`](Self::Validation),
/// [`Conflict`](Self::Conflict), [`OrphanNode`](Self::OrphanNode)) are only
/// produced by `load`, `merge` and `build`, and abort that construction.
/// [`UnknownLanguage`](Self::UnknownLanguage) is a recoverable query result.
/// [`NotBuilt`](Self::NotBuilt) and [`AlreadyBuilt`](Self::AlreadyBuilt)
/// indicate misuse of the index state machine.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    OrphanNode { message: String, details: Value },

    #[error("{message}")]
    UnknownLanguage { message: String, details: Value },

    #[error("Hierarchy index has not been built")]
    NotBuilt,

    #[error("Hierarchy index is already built")]
    AlreadyBuilt,

    #[error("{message}")]
    Source { message: String, details: Value },
}

/// Serializable error envelope for logs and tooling output.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

impl TaxonomyError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn orphan(message: impl Into<String>, details: Value) -> Self {
        Self::OrphanNode {
            message: message.into(),
            details,
        }
    }
    pub fn unknown_language(message: impl Into<String>, details: Value) -> Self {
        Self::UnknownLanguage {
            message: message.into(),
            details,
        }
    }
    pub fn source(message: impl Into<String>, details: Value) -> Self {
        Self::Source {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::OrphanNode { .. } => "orphan_node",
            Self::UnknownLanguage { .. } => "unknown_language",
            Self::NotBuilt => "not_built",
            Self::AlreadyBuilt => "already_built",
            Self::Source { .. } => "source_error",
        }
    }

    /// Returns true for errors a caller is expected to handle as a normal
    /// state, e.g. by falling back to another language.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownLanguage { .. })
    }

    /// Converts the error into its serializable envelope.
    pub fn to_info(&self) -> ErrorInfo {
        let details = match self {
            Self::Validation { details, .. }
            | Self::Conflict { details, .. }
            | Self::OrphanNode { details, .. }
            | Self::UnknownLanguage { details, .. }
            | Self::Source { details, .. } => details.clone(),
            Self::NotBuilt | Self::AlreadyBuilt => Value::Null,
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}
