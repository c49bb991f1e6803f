//! Concrete collaborators for the Stratum profile core.
//!
//! The core defines two seams, `ProfileRepository` (persistence) and
//! `TemplateIndexer` (search indexing). This crate provides the reference
//! implementations: TOML files on disk for persistence, and an in-memory
//! keyword index for search.

pub mod dto;
pub mod keyword_indexer;
pub mod toml_profile_repository;

pub use crate::keyword_indexer::KeywordTemplateIndexer;
pub use crate::toml_profile_repository::{StoredProfile, TomlProfileRepository};
