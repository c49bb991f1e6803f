//! Search-index trigger contract.
//!
//! The concrete indexing engine lives outside the profile core. The core
//! only needs a way to say "rebuild your index over this template set,
//! tagged with this scope" and to hold on to whatever handle comes back.

use crate::collection::NamedCollection;
use crate::template::TemplateQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scope a template index is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexScope {
    /// A single user's saved templates.
    User,
    /// The shared, site-wide template set.
    Global,
}

/// Opaque handle to a built template index.
///
/// A handle identifies one complete indexing run; rebuilding always yields
/// a fresh handle that replaces the previous one wholesale. The core never
/// looks inside an index, it only stores and hands out the handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHandle {
    id: Uuid,
    scope: IndexScope,
    entry_count: usize,
    built_at: DateTime<Utc>,
}

impl IndexHandle {
    /// Creates a handle for a freshly built index.
    pub fn new(scope: IndexScope, entry_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope,
            entry_count,
            built_at: Utc::now(),
        }
    }

    /// Unique identifier of the indexing run.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Scope the index was built for.
    pub fn scope(&self) -> IndexScope {
        self.scope
    }

    /// Number of templates the index covers.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// When the index was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

/// An abstract template search indexer.
///
/// The profile calls [`index_templates`](Self::index_templates) exactly
/// once per template mutation, passing the entire current template
/// collection (never a delta). The call is synchronous: the indexer must
/// return a handle or report failure within the same invocation, and the
/// triggering mutation blocks for the duration. Failure handling and retry
/// belong to the implementation; the profile keeps its in-memory change and
/// propagates the error.
pub trait TemplateIndexer: Send + Sync {
    /// Rebuilds the index over the given template set.
    ///
    /// # Arguments
    ///
    /// * `templates` - The complete current template collection
    /// * `scope` - The scope to tag the index with
    ///
    /// # Returns
    ///
    /// - `Ok(IndexHandle)`: Handle to the freshly built index
    /// - `Err(_)`: The index could not be built
    fn index_templates(
        &self,
        templates: &NamedCollection<TemplateQuery>,
        scope: IndexScope,
    ) -> anyhow::Result<IndexHandle>;
}
