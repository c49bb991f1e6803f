//! Stratum profile core.
//!
//! In-memory model of one user's personal workspace in a data-warehouse web
//! application: named collections of saved queries, saved bags, and saved
//! query templates, an ephemeral query history, and the two artifacts the
//! template collection derives (category grouping and search-index handle).
//!
//! The web layer, session handling, and concrete storage/indexing engines
//! live outside this crate; they plug in through the
//! [`ProfileRepository`](profile::ProfileRepository) and
//! [`TemplateIndexer`](template::TemplateIndexer) traits.

pub mod bag;
pub mod collection;
pub mod credential;
pub mod error;
pub mod profile;
pub mod query;
pub mod template;

// Re-export common error type
pub use error::{Result, StratumError};
