//! Authentication primitives: login credentials, stored password hashes,
//! session claims and the authenticated school identity.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{EmailAddress, FieldValidationError, ReferCode, School, SchoolId};

/// Validated login credentials used by the session service.
///
/// ## Invariants
/// - `email` is normalised (trimmed, lowercased).
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use school_portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Office@DAV.edu.in ", "password").unwrap();
/// assert_eq!(creds.email().as_str(), "office@dav.edu.in");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldValidationError> {
        let email = EmailAddress::parse(email)?;

        if password.is_empty() {
            return Err(FieldValidationError::MissingField { field: "password" });
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look up the school.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Stored credential hash in PHC string format.
///
/// The hash never leaves the domain through public views and is redacted from
/// debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string produced by a password hasher.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Borrow the PHC string for verification or storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Signed session token handed to a school after login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Claims carried inside a session token.
///
/// Timestamps are encoded as whole seconds since the Unix epoch, matching the
/// registered JWT claim names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "sub")]
    pub school_id: SchoolId,
    pub email: EmailAddress,
    #[serde(rename = "referCode")]
    pub refer_code: ReferCode,
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Claims for `school` valid from `issued_at` until `expires_at`.
    pub fn for_school(school: &School, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            school_id: school.id(),
            email: school.email().clone(),
            refer_code: school.refer_code().clone(),
            issued_at,
            expires_at,
        }
    }

    /// Whether the token has expired at `now`. Expiry is exclusive.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// School identity established by verifying a session token.
///
/// Dashboard queries are scoped by `refer_code` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolIdentity {
    pub school_id: SchoolId,
    pub email: EmailAddress,
    pub refer_code: ReferCode,
}

impl From<&School> for SchoolIdentity {
    fn from(school: &School) -> Self {
        Self {
            school_id: school.id(),
            email: school.email().clone(),
            refer_code: school.refer_code().clone(),
        }
    }
}
