//! The Profile composition and its operation contract.

use crate::bag::{BagKind, SavedBag};
use crate::collection::{NamedCollection, OrderPolicy};
use crate::credential::Credential;
use crate::error::{Result, StratumError};
use crate::profile::ProfileRepository;
use crate::query::SavedQuery;
use crate::template::{CategoryIndex, IndexHandle, IndexScope, TemplateIndexer, TemplateQuery};
use std::sync::Arc;

/// A user's personal workspace: saved queries, saved bags, saved query
/// templates, and an ephemeral query history, plus two artifacts derived
/// from the template collection (the category grouping and the search-index
/// handle).
///
/// # Consistency
///
/// Every mutation updates exactly one collection. Template mutations then
/// synchronously rebuild both derived artifacts before anything else
/// happens, so reads never observe a stale grouping or handle. Mutations of
/// the three durable collections notify the persistence delegate; history
/// mutations never do, because history lives and dies with the session.
///
/// # Concurrency
///
/// A profile is designed for single-owner access: mutations take
/// `&mut self`, so a hosting environment that shares one instance across
/// concurrent requests must wrap it in its own serialization boundary
/// (e.g., one lock per profile held across each operation).
pub struct Profile {
    repository: Option<Arc<dyn ProfileRepository>>,
    indexer: Arc<dyn TemplateIndexer>,
    username: String,
    credential: Credential,
    saved_queries: NamedCollection<SavedQuery>,
    saved_bags: NamedCollection<SavedBag>,
    saved_templates: NamedCollection<TemplateQuery>,
    history: NamedCollection<SavedQuery>,
    category_index: CategoryIndex,
    index_handle: IndexHandle,
}

impl Profile {
    /// Constructs a profile from a persisted snapshot of its three durable
    /// collections.
    ///
    /// History always starts empty; both derived artifacts are built before
    /// the profile is returned, which makes construction the one place
    /// besides template mutation where the indexer runs.
    ///
    /// # Arguments
    ///
    /// * `repository` - Persistence delegate, or `None` for a detached
    ///   profile (e.g., an anonymous session) that is never persisted
    /// * `indexer` - Search indexer invoked on every template mutation
    /// * `username` - Immutable identifier of the owning user
    /// * `credential` - Opaque secret, carried for the delegate only
    /// * `saved_queries` / `saved_bags` / `saved_templates` - Persisted
    ///   `(name, value)` pairs; later duplicates of a name win
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Indexing`] if the initial index build fails.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repository: Option<Arc<dyn ProfileRepository>>,
        indexer: Arc<dyn TemplateIndexer>,
        username: impl Into<String>,
        credential: Credential,
        saved_queries: Vec<(String, SavedQuery)>,
        saved_bags: Vec<(String, SavedBag)>,
        saved_templates: Vec<(String, TemplateQuery)>,
    ) -> Result<Self> {
        let saved_templates =
            NamedCollection::from_pairs(OrderPolicy::NameAscending, saved_templates);
        let category_index = CategoryIndex::build(&saved_templates);
        let index_handle = indexer
            .index_templates(&saved_templates, IndexScope::User)
            .map_err(|e| StratumError::indexing(e.to_string()))?;

        Ok(Self {
            repository,
            indexer,
            username: username.into(),
            credential,
            saved_queries: NamedCollection::from_pairs(OrderPolicy::NameAscending, saved_queries),
            saved_bags: NamedCollection::from_pairs(OrderPolicy::NameAscending, saved_bags),
            saved_templates,
            history: NamedCollection::insertion_ordered(),
            category_index,
            index_handle,
        })
    }

    /// The profile's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The profile's opaque credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    // ========================================================================
    // Saved queries
    // ========================================================================

    /// Iterates saved queries by name, ascending.
    pub fn queries(&self) -> impl Iterator<Item = (&str, &SavedQuery)> {
        self.saved_queries.iter()
    }

    /// Upserts a saved query and notifies the persistence delegate.
    pub fn save_query(&mut self, name: impl Into<String>, query: SavedQuery) -> Result<()> {
        self.saved_queries.put(name, query);
        self.persist()
    }

    /// Deletes a saved query and notifies the persistence delegate.
    ///
    /// Deleting an absent name is a no-op on the collection but still
    /// notifies the delegate, exactly like a present-name delete.
    pub fn delete_query(&mut self, name: &str) -> Result<()> {
        self.saved_queries.remove(name);
        self.persist()
    }

    // ========================================================================
    // Saved bags
    // ========================================================================

    /// Iterates saved bags by name, ascending.
    pub fn bags(&self) -> impl Iterator<Item = (&str, &SavedBag)> {
        self.saved_bags.iter()
    }

    /// Returns a fresh name-ascending collection of the id-bag subset.
    ///
    /// Derived on demand rather than cached: membership only changes when
    /// bags are added or removed, and recomputing on read is cheap.
    pub fn object_bags(&self) -> NamedCollection<SavedBag> {
        self.filtered_bags(BagKind::Id)
    }

    /// Returns a fresh name-ascending collection of the primitive-bag
    /// subset.
    pub fn primitive_bags(&self) -> NamedCollection<SavedBag> {
        self.filtered_bags(BagKind::Primitive)
    }

    fn filtered_bags(&self, kind: BagKind) -> NamedCollection<SavedBag> {
        let mut filtered = NamedCollection::sorted();
        for (name, bag) in self.saved_bags.iter() {
            if bag.kind() == kind {
                filtered.put(name, bag.clone());
            }
        }
        filtered
    }

    /// Upserts a saved bag and notifies the persistence delegate.
    pub fn save_bag(&mut self, name: impl Into<String>, bag: SavedBag) -> Result<()> {
        self.saved_bags.put(name, bag);
        self.persist()
    }

    /// Deletes a saved bag and notifies the persistence delegate.
    pub fn delete_bag(&mut self, name: &str) -> Result<()> {
        self.saved_bags.remove(name);
        self.persist()
    }

    // ========================================================================
    // Saved templates
    // ========================================================================

    /// Iterates saved templates by name, ascending.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &TemplateQuery)> {
        self.saved_templates.iter()
    }

    /// The category grouping derived from the current template collection.
    ///
    /// Always reflects the last template mutation; reads never recompute.
    pub fn category_templates(&self) -> &CategoryIndex {
        &self.category_index
    }

    /// The handle of the last template index build.
    pub fn index_handle(&self) -> &IndexHandle {
        &self.index_handle
    }

    /// Upserts a template, rebuilds both derived artifacts, and notifies
    /// the persistence delegate.
    pub fn save_template(&mut self, name: impl Into<String>, template: TemplateQuery) -> Result<()> {
        self.saved_templates.put(name, template);
        self.rebuild_derived()?;
        self.persist()
    }

    /// Deletes a template, rebuilds both derived artifacts, and notifies
    /// the persistence delegate.
    ///
    /// As with every delete, an absent name still triggers the rebuild and
    /// the delegate notification.
    pub fn delete_template(&mut self, name: &str) -> Result<()> {
        self.saved_templates.remove(name);
        self.rebuild_derived()?;
        self.persist()
    }

    // ========================================================================
    // Query history (session-scoped, never persisted)
    // ========================================================================

    /// Iterates the query history in insertion order.
    pub fn history(&self) -> impl Iterator<Item = (&str, &SavedQuery)> {
        self.history.iter()
    }

    /// Upserts a query into the history, keyed by the query's own name.
    pub fn save_history(&mut self, query: SavedQuery) {
        let name = query.name.clone();
        self.history.put(name, query);
    }

    /// Removes a history entry. No-op on absent names.
    pub fn delete_history(&mut self, name: &str) {
        self.history.remove(name);
    }

    /// Renames a history entry in place, preserving the relative order of
    /// all entries and the original entry's timestamp and definition.
    ///
    /// The history is rebuilt in scan order and swapped in atomically from
    /// the caller's point of view. Renaming a name that is not present is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::NameConflict`] if `new_name` already belongs
    /// to a different entry; the history is left untouched. Overwriting
    /// silently would drop one of the two entries.
    pub fn rename_history(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if new_name != old_name && self.history.contains(new_name) {
            return Err(StratumError::name_conflict("history", new_name));
        }
        let mut renamed = NamedCollection::insertion_ordered();
        for (name, query) in self.history.iter() {
            if name == old_name {
                renamed.put(new_name, query.renamed(new_name));
            } else {
                renamed.put(name, query.clone());
            }
        }
        self.history = renamed;
        Ok(())
    }

    // ========================================================================
    // Collaborator hooks
    // ========================================================================

    /// Rebuilds the category grouping and the search index from the current
    /// template collection.
    ///
    /// The grouping is rebuilt first so it is current even if indexing
    /// fails.
    fn rebuild_derived(&mut self) -> Result<()> {
        self.category_index = CategoryIndex::build(&self.saved_templates);
        self.index_handle = self
            .indexer
            .index_templates(&self.saved_templates, IndexScope::User)
            .map_err(|e| StratumError::indexing(e.to_string()))?;
        Ok(())
    }

    /// Asks the persistence delegate (if any) to save this profile.
    fn persist(&self) -> Result<()> {
        if let Some(repository) = &self.repository {
            repository
                .save(self)
                .map_err(|e| StratumError::persistence(e.to_string()))?;
        }
        Ok(())
    }
}
