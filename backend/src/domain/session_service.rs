//! Session service: credential checks, token issuance and authorisation.
//!
//! Authorisation never trusts a token alone. After the signature and expiry
//! are checked the owning school is resolved again by refer code, so a token
//! whose school has gone away stops working immediately.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::failures::{
    invalid_credentials, not_logged_in, school_lookup_error, tampered_token, token_expired,
};
use crate::domain::ports::{
    PasswordHasher, SchoolRepository, SessionService, SessionTokenCodec, SessionTokenCodecError,
};
use crate::domain::{Error, IssuedSession, LoginCredentials, SchoolIdentity, SessionClaims};

/// Session lifetime used when no configuration overrides it.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

fn map_codec_error(error: SessionTokenCodecError) -> Error {
    match error {
        SessionTokenCodecError::Malformed { message } => {
            debug!(reason = %message, "rejecting malformed session token");
            not_logged_in()
        }
        SessionTokenCodecError::SignatureMismatch => tampered_token(),
        SessionTokenCodecError::Encoding { message } => {
            Error::internal(format!("session token codec failed: {message}"))
        }
    }
}

/// Session service implementing [`SessionService`].
#[derive(Clone)]
pub struct SchoolSessionService<S, H, C> {
    schools: Arc<S>,
    hasher: Arc<H>,
    codec: Arc<C>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

impl<S, H, C> SchoolSessionService<S, H, C> {
    /// Create a session service issuing tokens valid for `token_ttl`.
    pub fn new(
        schools: Arc<S>,
        hasher: Arc<H>,
        codec: Arc<C>,
        clock: Arc<dyn Clock>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            schools,
            hasher,
            codec,
            clock,
            token_ttl,
        }
    }
}

#[async_trait]
impl<S, H, C> SessionService for SchoolSessionService<S, H, C>
where
    S: SchoolRepository,
    H: PasswordHasher,
    C: SessionTokenCodec,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<IssuedSession, Error> {
        let Some(school) = self
            .schools
            .find_by_email(credentials.email())
            .await
            .map_err(school_lookup_error)?
        else {
            // Unknown emails pay for one verification, as a wrong password does.
            let decoy = self.hasher.decoy_hash();
            if let Err(error) = self.hasher.verify(credentials.password(), &decoy).await {
                debug!(%error, "decoy credential check failed");
            }
            return Err(invalid_credentials());
        };

        let verified = self
            .hasher
            .verify(credentials.password(), school.password_hash())
            .await
            .map_err(|error| Error::internal(format!("credential check failed: {error}")))?;
        if !verified {
            return Err(invalid_credentials());
        }

        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| Error::internal("session expiry is out of range"))?;
        let claims = SessionClaims::for_school(&school, issued_at, expires_at);
        let token = self.codec.encode(&claims).map_err(map_codec_error)?;

        info!(school_id = %school.id(), "school logged in");
        Ok(IssuedSession { token, expires_at })
    }

    async fn authorize(&self, token: &str) -> Result<SchoolIdentity, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Err(not_logged_in());
        }

        let claims = self.codec.decode(token).map_err(map_codec_error)?;
        if claims.is_expired_at(self.clock.utc()) {
            return Err(token_expired());
        }

        let school = self
            .schools
            .find_by_refer_code(&claims.refer_code)
            .await
            .map_err(school_lookup_error)?
            .filter(|school| school.id() == claims.school_id)
            .ok_or_else(not_logged_in)?;

        Ok(SchoolIdentity::from(&school))
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
