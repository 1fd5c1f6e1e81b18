//! Shared secret guarding the update endpoint.

use std::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;

/// The single credential allowed to post state changes.
///
/// Cheap to clone. `Debug` never prints the value.
#[derive(Clone)]
pub struct SharedSecret(Arc<str>);

impl SharedSecret {
    /// Wraps a secret string.
    #[must_use]
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    /// Compares a presented credential in constant time.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        // Length is leaked; content is not.
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}
