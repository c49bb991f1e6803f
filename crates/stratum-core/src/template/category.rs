//! Derived grouping of templates by category label.

use crate::collection::NamedCollection;
use crate::template::TemplateQuery;
use std::collections::HashMap;

/// Grouping of templates by category label, derived from a template
/// collection.
///
/// Category labels appear in the order they are first encountered while
/// scanning the template collection in its own (name-ascending) order, and
/// templates within a label keep that traversal order. The index is a pure
/// function of the collection it was built from; the profile rebuilds it on
/// every template mutation rather than patching it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    order: Vec<String>,
    buckets: HashMap<String, Vec<TemplateQuery>>,
}

impl CategoryIndex {
    /// Builds the grouping from the current template collection.
    ///
    /// An empty collection yields an empty index.
    pub fn build(templates: &NamedCollection<TemplateQuery>) -> Self {
        let mut index = Self::default();
        for template in templates.values() {
            if !index.buckets.contains_key(&template.category) {
                index.order.push(template.category.clone());
            }
            index
                .buckets
                .entry(template.category.clone())
                .or_default()
                .push(template.clone());
        }
        index
    }

    /// Iterates category labels in first-appearance order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Returns the templates grouped under a label, if the label exists.
    pub fn templates_in(&self, category: &str) -> Option<&[TemplateQuery]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    /// Iterates `(label, templates)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TemplateQuery])> {
        self.order.iter().filter_map(|category| {
            self.buckets
                .get(category)
                .map(|bucket| (category.as_str(), bucket.as_slice()))
        })
    }

    /// Number of distinct category labels.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no templates were grouped.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
