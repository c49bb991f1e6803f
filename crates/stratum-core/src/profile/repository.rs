//! Profile persistence delegate trait.
//!
//! Defines the interface for persisting a profile's durable collections.

use super::model::Profile;

/// An abstract persistence delegate for profiles.
///
/// This trait decouples the profile core from the concrete storage
/// mechanism (e.g., TOML files, a database, a remote API). The profile
/// invokes [`save`](Self::save) once per mutation of its saved queries,
/// bags, or templates; query history is session-scoped and never persisted.
///
/// # Implementation Notes
///
/// The call is synchronous from the profile's call site: implementations
/// must complete or fail within the same invocation, and a slow save blocks
/// the triggering mutation by design. On failure the profile keeps its
/// in-memory change and propagates the error, so durable state may lag the
/// in-memory state until the next successful save; reconciliation is the
/// implementation's concern.
pub trait ProfileRepository: Send + Sync {
    /// Persists the profile's durable collections.
    ///
    /// # Arguments
    ///
    /// * `profile` - The profile to persist
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Profile saved successfully
    /// - `Err(_)`: Error occurred during save
    fn save(&self, profile: &Profile) -> anyhow::Result<()>;
}
