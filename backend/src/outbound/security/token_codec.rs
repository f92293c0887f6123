//! HMAC-SHA256 session token codec.
//!
//! Tokens use the compact `header.claims.signature` layout with unpadded
//! URL-safe base64 segments and an `HS256` header, so standard JWT tooling can
//! inspect them. Only `HS256` is accepted when decoding.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{SessionTokenCodec, SessionTokenCodecError};
use crate::domain::{SessionClaims, SessionToken};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// [`SessionTokenCodec`] signing with a shared secret.
pub struct HmacSessionTokenCodec {
    secret: Zeroizing<Vec<u8>>,
}

impl HmacSessionTokenCodec {
    /// Build a codec signing with `secret`.
    pub fn new(secret: Zeroizing<Vec<u8>>) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256, SessionTokenCodecError> {
        HmacSha256::new_from_slice(self.secret.as_slice())
            .map_err(|err| SessionTokenCodecError::encoding(err.to_string()))
    }

    fn encoded_header() -> Result<String, SessionTokenCodecError> {
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: TOKEN_TYPE.to_owned(),
        };
        let json = serde_json::to_vec(&header)
            .map_err(|err| SessionTokenCodecError::encoding(err.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }
}

impl std::fmt::Debug for HmacSessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSessionTokenCodec")
            .finish_non_exhaustive()
    }
}

fn split_token(token: &str) -> Result<(&str, &str, &str), SessionTokenCodecError> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(claims), Some(signature), None)
            if !header.is_empty() && !claims.is_empty() && !signature.is_empty() =>
        {
            Ok((header, claims, signature))
        }
        _ => Err(SessionTokenCodecError::malformed(
            "expected three non-empty segments",
        )),
    }
}

fn check_header(segment: &str) -> Result<(), SessionTokenCodecError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| SessionTokenCodecError::malformed("header is not base64url"))?;
    let header: Header = serde_json::from_slice(&bytes)
        .map_err(|_| SessionTokenCodecError::malformed("header is not valid JSON"))?;
    if header.alg != ALGORITHM {
        return Err(SessionTokenCodecError::malformed(format!(
            "unsupported algorithm {}",
            header.alg
        )));
    }
    Ok(())
}

impl SessionTokenCodec for HmacSessionTokenCodec {
    fn encode(&self, claims: &SessionClaims) -> Result<SessionToken, SessionTokenCodecError> {
        let header = Self::encoded_header()?;
        let body = serde_json::to_vec(claims)
            .map_err(|err| SessionTokenCodecError::encoding(err.to_string()))?;
        let signing_input = format!("{header}.{}", URL_SAFE_NO_PAD.encode(body));

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(SessionToken::new(format!("{signing_input}.{signature}")))
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, SessionTokenCodecError> {
        let (header, claims, signature) = split_token(token)?;
        check_header(header)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SessionTokenCodecError::signature_mismatch())?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionTokenCodecError::signature_mismatch())?;

        let bytes = URL_SAFE_NO_PAD
            .decode(claims)
            .map_err(|_| SessionTokenCodecError::malformed("claims are not base64url"))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| SessionTokenCodecError::malformed(format!("claims rejected: {err}")))
    }
}
