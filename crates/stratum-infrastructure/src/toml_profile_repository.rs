//! TOML-file implementation of the profile persistence delegate.
//!
//! Stores one `<username>.profile.toml` document per profile under a base
//! directory. Every save rewrites the whole document; query history is
//! session-scoped and never touches disk.

use crate::dto;
use anyhow::{Context, bail};
use std::fs;
use std::path::PathBuf;
use stratum_core::bag::SavedBag;
use stratum_core::credential::Credential;
use stratum_core::profile::{Profile, ProfileRepository};
use stratum_core::query::SavedQuery;
use stratum_core::template::TemplateQuery;

/// A profile's durable collections as loaded from storage.
///
/// This is what a session layer feeds into `Profile::new` after login;
/// history is absent because it never persists.
#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub username: String,
    pub credential: Credential,
    pub queries: Vec<(String, SavedQuery)>,
    pub bags: Vec<(String, SavedBag)>,
    pub templates: Vec<(String, TemplateQuery)>,
}

/// Persists profiles as TOML files in a directory.
pub struct TomlProfileRepository {
    base_dir: PathBuf,
}

impl TomlProfileRepository {
    /// Creates a repository rooted at `base_dir`.
    ///
    /// The directory is created lazily on first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn profile_path(&self, username: &str) -> anyhow::Result<PathBuf> {
        // Usernames become file names, so path metacharacters are rejected
        // rather than escaped.
        if username.is_empty()
            || username.contains(['/', '\\'])
            || username.contains("..")
        {
            bail!("Username {username:?} is not usable as a profile file name");
        }
        Ok(self.base_dir.join(format!("{username}.profile.toml")))
    }

    /// Loads a profile's durable collections, if a document exists.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StoredProfile))`: Document found and parsed
    /// - `Ok(None)`: No document for this username
    /// - `Err(_)`: Document exists but cannot be read or parsed
    pub fn load(&self, username: &str) -> anyhow::Result<Option<StoredProfile>> {
        let path = self.profile_path(username)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile file at {path:?}"))?;
        let document: dto::ProfileV1 = toml::from_str(&content)
            .with_context(|| format!("Failed to parse profile TOML at {path:?}"))?;
        let (queries, bags, templates) = dto::dto_to_collections(&document)?;

        Ok(Some(StoredProfile {
            username: document.username,
            credential: Credential::new(document.credential),
            queries,
            bags,
            templates,
        }))
    }

    /// Deletes a profile's document. Missing documents are not an error.
    pub fn delete(&self, username: &str) -> anyhow::Result<()> {
        let path = self.profile_path(username)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete profile file at {path:?}")),
        }
    }
}

impl ProfileRepository for TomlProfileRepository {
    fn save(&self, profile: &Profile) -> anyhow::Result<()> {
        let path = self.profile_path(profile.username())?;
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create profile directory at {:?}", self.base_dir))?;

        let document = dto::profile_to_dto(profile)?;
        let toml_string =
            toml::to_string_pretty(&document).context("Failed to serialize profile to TOML")?;
        fs::write(&path, toml_string)
            .with_context(|| format!("Failed to write profile file at {path:?}"))?;

        tracing::debug!(username = profile.username(), path = ?path, "Saved profile snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword_indexer::KeywordTemplateIndexer;
    use serde_json::json;
    use std::sync::Arc;
    use stratum_core::bag::{IdBag, PrimitiveBag};
    use stratum_core::template::TemplateQuery;

    fn profile_with_repository(repository: Arc<TomlProfileRepository>) -> Profile {
        Profile::new(
            Some(repository),
            Arc::new(KeywordTemplateIndexer::default()),
            "alice",
            Credential::new("secret"),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(TomlProfileRepository::new(dir.path()));
        let mut profile = profile_with_repository(repository.clone());

        profile
            .save_query("employees", SavedQuery::new("employees", json!({"from": "Employee"})))
            .unwrap();
        profile
            .save_bag(
                "ids",
                IdBag {
                    ids: [3, 1, 2].into_iter().collect(),
                }
                .into(),
            )
            .unwrap();
        profile
            .save_bag(
                "labels",
                PrimitiveBag {
                    values: vec![json!("a"), json!(42)],
                }
                .into(),
            )
            .unwrap();
        profile
            .save_template(
                "t1",
                TemplateQuery::new("t1", "gene", json!({"from": "Gene"}))
                    .with_title("All genes")
                    .with_keywords(["gene", "search"]),
            )
            .unwrap();
        // History must never reach disk.
        profile.save_history(SavedQuery::new("recent", json!({})));

        let stored = repository.load("alice").unwrap().unwrap();
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.credential.expose(), "secret");
        assert_eq!(stored.queries.len(), 1);
        assert_eq!(stored.queries[0].0, "employees");
        assert_eq!(stored.queries[0].1.definition, json!({"from": "Employee"}));
        assert_eq!(stored.bags.len(), 2);
        assert_eq!(stored.templates.len(), 1);
        assert_eq!(stored.templates[0].1.category, "gene");
        assert_eq!(stored.templates[0].1.keywords, ["gene", "search"]);

        // Rebuilding a profile from the stored collections starts with an
        // empty history.
        let restored = Profile::new(
            Some(repository),
            Arc::new(KeywordTemplateIndexer::default()),
            stored.username,
            stored.credential,
            stored.queries,
            stored.bags,
            stored.templates,
        )
        .unwrap();
        assert_eq!(restored.history().count(), 0);
        assert_eq!(restored.queries().count(), 1);
    }

    #[test]
    fn test_load_missing_profile_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repository = TomlProfileRepository::new(dir.path());
        assert!(repository.load("nobody").unwrap().is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(TomlProfileRepository::new(dir.path()));
        let mut profile = profile_with_repository(repository.clone());
        profile.save_query("q", SavedQuery::new("q", json!({}))).unwrap();

        repository.delete("alice").unwrap();
        repository.delete("alice").unwrap();
        assert!(repository.load("alice").unwrap().is_none());
    }

    #[test]
    fn test_path_metacharacters_in_username_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repository = TomlProfileRepository::new(dir.path());
        assert!(repository.load("../etc/passwd").is_err());
        assert!(repository.load("a/b").is_err());
    }
}
