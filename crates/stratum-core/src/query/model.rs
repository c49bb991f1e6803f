//! SavedQuery domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved query: a name, a creation timestamp, and an opaque structured
/// query definition.
///
/// This is an immutable value type; "renaming" one means constructing a new
/// instance via [`renamed`](Self::renamed), which carries the original
/// timestamp and definition. The definition's shape belongs to the query
/// engine, not this core, so it is held as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    /// Name of the query.
    pub name: String,
    /// Timestamp when the query was created.
    pub created_at: DateTime<Utc>,
    /// Opaque structured-query definition.
    pub definition: serde_json::Value,
}

impl SavedQuery {
    /// Creates a saved query stamped with the current time.
    pub fn new(name: impl Into<String>, definition: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            definition,
        }
    }

    /// Returns a copy carrying `new_name` but the original creation
    /// timestamp and definition.
    pub fn renamed(&self, new_name: impl Into<String>) -> Self {
        Self {
            name: new_name.into(),
            created_at: self.created_at,
            definition: self.definition.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renamed_keeps_timestamp_and_definition() {
        let original = SavedQuery::new("employees", json!({"from": "Employee"}));
        let renamed = original.renamed("staff");
        assert_eq!(renamed.name, "staff");
        assert_eq!(renamed.created_at, original.created_at);
        assert_eq!(renamed.definition, original.definition);
    }
}
