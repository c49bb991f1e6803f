//! TemplateQuery domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved, parameterized query template.
///
/// Extends the saved-query shape with a category label used for grouping
/// and with indexing metadata (title, description, keywords). The metadata
/// is consumed only by the search indexer; the profile core carries it
/// opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateQuery {
    /// Name of the template.
    pub name: String,
    /// Timestamp when the template was created.
    pub created_at: DateTime<Utc>,
    /// Opaque structured-query definition.
    pub definition: serde_json::Value,
    /// Category label the template is grouped under.
    pub category: String,
    /// Human-readable title, for the search indexer.
    pub title: String,
    /// Longer description, for the search indexer.
    pub description: String,
    /// Free-form keywords, for the search indexer.
    pub keywords: Vec<String>,
}

impl TemplateQuery {
    /// Creates a template stamped with the current time and empty indexing
    /// metadata.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        definition: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            definition,
            category: category.into(),
            title: String::new(),
            description: String::new(),
            keywords: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}
