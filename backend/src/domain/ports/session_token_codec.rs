//! Port for signing and verifying session tokens.
//!
//! The codec only checks structure and signature. Expiry is judged by the
//! session service against its injected clock.

use crate::domain::{SessionClaims, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised while encoding or decoding session tokens.
    pub enum SessionTokenCodecError {
        /// The token does not have the expected `header.claims.signature`
        /// shape, or its header or claims cannot be decoded.
        Malformed { message: String } => "session token malformed: {message}",
        /// The signature does not match the token contents.
        SignatureMismatch => "session token signature mismatch",
        /// Claims could not be serialised while issuing a token.
        Encoding { message: String } => "session token encoding failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionTokenCodec: Send + Sync {
    /// Sign `claims` into a compact token.
    fn encode(&self, claims: &SessionClaims) -> Result<SessionToken, SessionTokenCodecError>;

    /// Verify `token` and return its claims.
    fn decode(&self, token: &str) -> Result<SessionClaims, SessionTokenCodecError>;
}
