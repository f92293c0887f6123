//! Port for one-way credential hashing.
//!
//! Hashing is CPU bound; adapters are expected to move the work off the async
//! executor.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Producing a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a plain-text password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for unusable
    /// hashes.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;

    /// A well-formed hash that no accepted password verifies against.
    ///
    /// Verifying it costs the same as verifying a stored hash.
    fn decoy_hash(&self) -> PasswordHash;
}

/// Reversible test hasher for services that do not exercise real hashing.
///
/// Produces `plain$<password>`. Never wire this into a running server.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(format!("plain${password}")))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let stored = hash
            .as_str()
            .strip_prefix("plain$")
            .ok_or_else(|| PasswordHasherError::malformed_hash("missing fixture prefix"))?;
        Ok(stored == password)
    }

    /// Matches only the empty password, which login credentials never carry.
    fn decoy_hash(&self) -> PasswordHash {
        PasswordHash::new("plain$")
    }
}
