//! Error types for the Stratum profile core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the profile core.
///
/// This provides typed, structured error variants for the narrow set of
/// failures the core can surface. Deleting an absent name is deliberately
/// not an error anywhere in the core (idempotent delete).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StratumError {
    /// A rename would collide with a different existing entry.
    #[error("Name conflict: {collection} entry '{name}' already exists")]
    NameConflict { collection: String, name: String },

    /// The persistence delegate failed during a mutating call.
    ///
    /// The in-memory change that triggered the save is retained; callers
    /// decide whether to retry or surface the failure.
    #[error("Persistence delegate error: {0}")]
    Persistence(String),

    /// The template indexer failed while rebuilding the search index.
    ///
    /// As with persistence failures, the template collection keeps the
    /// change that triggered the rebuild.
    #[error("Template indexing error: {0}")]
    Indexing(String),
}

impl StratumError {
    /// Creates a NameConflict error.
    pub fn name_conflict(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NameConflict {
            collection: collection.into(),
            name: name.into(),
        }
    }

    /// Creates a Persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an Indexing error.
    pub fn indexing(message: impl Into<String>) -> Self {
        Self::Indexing(message.into())
    }

    /// Check if this is a NameConflict error.
    pub fn is_name_conflict(&self) -> bool {
        matches!(self, Self::NameConflict { .. })
    }

    /// Check if this is a collaborator failure (persistence or indexing).
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Indexing(_))
    }
}

/// Result type alias using [`StratumError`].
pub type Result<T> = std::result::Result<T, StratumError>;
