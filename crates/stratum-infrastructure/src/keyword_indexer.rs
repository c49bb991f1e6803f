//! In-memory keyword implementation of the template indexer.
//!
//! Tokenizes each template's name, title, description, keywords, and
//! category into a posting map and stores one map per indexing run, keyed
//! by the handle's id. Search features resolve a handle plus a term to the
//! names of the matching templates.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use stratum_core::collection::NamedCollection;
use stratum_core::template::{IndexHandle, IndexScope, TemplateIndexer, TemplateQuery};
use uuid::Uuid;

type Postings = HashMap<String, BTreeSet<String>>;

/// Keyword index over template metadata, held entirely in memory.
///
/// Every `index_templates` call produces a complete new posting map; the
/// caller is expected to treat the returned handle as replacing any earlier
/// one and may [`evict`](Self::evict) the stale run.
#[derive(Default)]
pub struct KeywordTemplateIndexer {
    runs: Mutex<HashMap<Uuid, Postings>>,
}

impl KeywordTemplateIndexer {
    /// Creates an empty indexer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of templates matching `term` in the given run.
    ///
    /// An unknown handle or term yields an empty result.
    pub fn lookup(&self, handle: &IndexHandle, term: &str) -> Vec<String> {
        let runs = self.runs.lock().unwrap_or_else(|e| e.into_inner());
        runs.get(&handle.id())
            .and_then(|postings| postings.get(&term.to_lowercase()))
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Drops the posting map of a superseded run.
    pub fn evict(&self, handle: &IndexHandle) {
        let mut runs = self.runs.lock().unwrap_or_else(|e| e.into_inner());
        runs.remove(&handle.id());
    }

    /// Number of runs currently held.
    pub fn run_count(&self) -> usize {
        let runs = self.runs.lock().unwrap_or_else(|e| e.into_inner());
        runs.len()
    }
}

fn tokenize(text: &str, terms: &mut BTreeSet<String>) {
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if !token.is_empty() {
            terms.insert(token.to_lowercase());
        }
    }
}

fn template_terms(name: &str, template: &TemplateQuery) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    tokenize(name, &mut terms);
    tokenize(&template.name, &mut terms);
    tokenize(&template.title, &mut terms);
    tokenize(&template.description, &mut terms);
    tokenize(&template.category, &mut terms);
    for keyword in &template.keywords {
        tokenize(keyword, &mut terms);
    }
    terms
}

impl TemplateIndexer for KeywordTemplateIndexer {
    fn index_templates(
        &self,
        templates: &NamedCollection<TemplateQuery>,
        scope: IndexScope,
    ) -> anyhow::Result<IndexHandle> {
        let handle = IndexHandle::new(scope, templates.len());

        let mut postings: Postings = HashMap::new();
        for (name, template) in templates.iter() {
            for term in template_terms(name, template) {
                postings.entry(term).or_default().insert(name.to_string());
            }
        }

        let mut runs = self.runs.lock().unwrap_or_else(|e| e.into_inner());
        runs.insert(handle.id(), postings);
        tracing::debug!(
            scope = ?scope,
            templates = templates.len(),
            "Rebuilt keyword template index"
        );
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn templates(entries: Vec<TemplateQuery>) -> NamedCollection<TemplateQuery> {
        let mut collection = NamedCollection::sorted();
        for entry in entries {
            collection.put(entry.name.clone(), entry);
        }
        collection
    }

    #[test]
    fn test_lookup_matches_metadata_terms() {
        let indexer = KeywordTemplateIndexer::new();
        let handle = indexer
            .index_templates(
                &templates(vec![
                    TemplateQuery::new("gene_report", "gene", json!({}))
                        .with_title("Gene overview report")
                        .with_keywords(["expression"]),
                    TemplateQuery::new("protein_report", "protein", json!({})),
                ]),
                IndexScope::User,
            )
            .unwrap();

        assert_eq!(indexer.lookup(&handle, "expression"), ["gene_report"]);
        assert_eq!(indexer.lookup(&handle, "OVERVIEW"), ["gene_report"]);
        // "report" appears in both names.
        assert_eq!(
            indexer.lookup(&handle, "report"),
            ["gene_report", "protein_report"]
        );
        assert!(indexer.lookup(&handle, "pathway").is_empty());
    }

    #[test]
    fn test_each_run_gets_a_fresh_handle_and_postings() {
        let indexer = KeywordTemplateIndexer::new();
        let set = templates(vec![TemplateQuery::new("t1", "gene", json!({}))]);

        let first = indexer.index_templates(&set, IndexScope::User).unwrap();
        let second = indexer.index_templates(&set, IndexScope::User).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(indexer.run_count(), 2);

        indexer.evict(&first);
        assert_eq!(indexer.run_count(), 1);
        assert!(indexer.lookup(&first, "gene").is_empty());
        assert_eq!(indexer.lookup(&second, "gene"), ["t1"]);
    }

    #[test]
    fn test_empty_collection_indexes_cleanly() {
        let indexer = KeywordTemplateIndexer::new();
        let handle = indexer
            .index_templates(&NamedCollection::sorted(), IndexScope::User)
            .unwrap();
        assert_eq!(handle.entry_count(), 0);
        assert!(indexer.lookup(&handle, "anything").is_empty());
    }
}
