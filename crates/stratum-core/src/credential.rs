//! Opaque credential wrapper.
//!
//! The core never compares or hashes credentials; it only carries them so a
//! persistence delegate can store them alongside the rest of the profile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's opaque secret, immutable after construction.
///
/// # Security Note
///
/// The `Debug` impl redacts the value so credentials never leak into logs
/// or error messages. Use [`expose`](Self::expose) at the storage boundary
/// only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a secret string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("hunter2");
        assert_eq!(format!("{credential:?}"), "Credential(<redacted>)");
        assert_eq!(credential.expose(), "hunter2");
    }
}
