//! Driving port for login and per-request authorisation.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials and to authorise bearer tokens without knowing
//! which signing scheme or store sits behind it.

use async_trait::async_trait;

use crate::domain::{Error, IssuedSession, LoginCredentials, SchoolIdentity};

/// Domain use-case port for school sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Validate credentials and issue a signed session token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<IssuedSession, Error>;

    /// Verify a bearer token and resolve the school it belongs to.
    ///
    /// Must be called on every protected request; results are never cached.
    async fn authorize(&self, token: &str) -> Result<SchoolIdentity, Error>;
}
