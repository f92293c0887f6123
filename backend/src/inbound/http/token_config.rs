//! Token secret and webhook key configuration.
//!
//! Secrets are read from files named by environment variables so they can be
//! mounted by the orchestrator. Debug builds fall back to an ephemeral token
//! secret with a warning; release builds refuse to start without real
//! secrets of sufficient length.

pub mod fingerprint;

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};
use zeroize::{Zeroize, Zeroizing};

use self::fingerprint::secret_fingerprint;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
/// Minimum token secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const TOKEN_SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const WEBHOOK_KEY_FILE_ENV: &str = "PAYMENT_WEBHOOK_KEY_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings.
    Debug,
    /// Release builds require explicit, valid secrets.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use school_portal::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Shared key presented by the payment collaborator as a bearer token.
#[derive(Clone)]
pub struct WebhookKey(Zeroizing<String>);

impl WebhookKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for WebhookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookKey(<redacted>)")
    }
}

/// Secrets loaded at startup.
pub struct SecretSettings {
    /// HMAC key for session tokens.
    pub token_secret: Zeroizing<Vec<u8>>,
    /// Truncated SHA-256 fingerprint of `token_secret`, safe to log.
    pub token_fingerprint: String,
    /// Whether `token_secret` was generated for this process only.
    pub ephemeral: bool,
    /// Key for the payment confirmation webhook, if configured.
    pub webhook_key: Option<WebhookKey>,
}

impl fmt::Debug for SecretSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSettings")
            .field("token_fingerprint", &self.token_fingerprint)
            .field("ephemeral", &self.ephemeral)
            .field("webhook_key", &self.webhook_key)
            .finish_non_exhaustive()
    }
}

/// Errors raised while loading secrets.
#[derive(thiserror::Error, Debug)]
pub enum SecretConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading a secret file failed.
    #[error("failed to read secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The token secret is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// The webhook key file exists but holds no key.
    #[error("payment webhook key at {path} is empty")]
    EmptyWebhookKey { path: PathBuf },
    /// Release builds must not allow ephemeral token secrets.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load secrets from environment-named files according to `mode`.
///
/// # Examples
///
/// ```rust
/// use school_portal::inbound::http::token_config::{BuildMode, secret_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&secret_path, vec![b'a'; 32])?;
///
/// let secret_path = secret_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(secret_path.clone()),
///     "TOKEN_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let settings = secret_settings_from_env(&env, BuildMode::Release)?;
/// assert!(!settings.ephemeral);
/// assert!(settings.webhook_key.is_none());
/// # Ok(())
/// # }
/// ```
pub fn secret_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SecretSettings, SecretConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let (token_secret, ephemeral) = token_secret_from_env(env, mode, allow_ephemeral)?;
    let token_fingerprint = secret_fingerprint(&token_secret);
    let webhook_key = webhook_key_from_env(env, mode)?;

    Ok(SecretSettings {
        token_secret,
        token_fingerprint,
        ephemeral,
        webhook_key,
    })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SecretConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        if mode.is_debug() {
            warn!("TOKEN_ALLOW_EPHEMERAL not set; defaulting to disabled");
            return Ok(false);
        }
        return Err(SecretConfigError::MissingEnv {
            name: ALLOW_EPHEMERAL_ENV,
        });
    };

    match (parse_bool(&value), mode) {
        (Some(true), BuildMode::Debug) => Ok(true),
        (Some(true), BuildMode::Release) => Err(SecretConfigError::EphemeralNotAllowed),
        (Some(false), _) => Ok(false),
        (None, BuildMode::Debug) => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        (None, BuildMode::Release) => Err(SecretConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<(Zeroizing<Vec<u8>>, bool), SecretConfigError> {
    let path = PathBuf::from(
        env.string(TOKEN_SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_string()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                bytes.zeroize();
                return Err(SecretConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            Ok((Zeroizing::new(bytes), false))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using ephemeral token secret (dev only); sessions end on restart"
            );
            Ok((ephemeral_secret(), true))
        }
        Err(error) => Err(SecretConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut bytes = Zeroizing::new(vec![0_u8; TOKEN_SECRET_MIN_LEN]);
    OsRng.fill_bytes(bytes.as_mut_slice());
    bytes
}

fn webhook_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<WebhookKey>, SecretConfigError> {
    let Some(raw_path) = env.string(WEBHOOK_KEY_FILE_ENV) else {
        info!("PAYMENT_WEBHOOK_KEY_FILE not set; payment confirmation disabled");
        return Ok(None);
    };
    let path = PathBuf::from(raw_path);

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => Zeroizing::new(contents),
        Err(error) if mode.is_debug() => {
            warn!(
                path = %path.display(),
                error = %error,
                "payment webhook key unreadable; payment confirmation disabled"
            );
            return Ok(None);
        }
        Err(error) => return Err(SecretConfigError::SecretRead { path, source: error }),
    };

    let key = contents.trim();
    if key.is_empty() {
        if mode.is_debug() {
            warn!(path = %path.display(), "payment webhook key empty; payment confirmation disabled");
            return Ok(None);
        }
        return Err(SecretConfigError::EmptyWebhookKey { path });
    }
    Ok(Some(WebhookKey::new(key)))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
