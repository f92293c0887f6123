//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PORTAL_*` environment variables and an
//! optional configuration file, in the precedence OrthoConfig applies.
//! Secrets are not settings; see
//! [`school_portal::inbound::http::token_config`].

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use school_portal::domain::DEFAULT_TOKEN_TTL_MINUTES;

/// Contact quoted to schools whose refer code collides.
pub const DEFAULT_SUPPORT_CONTACT: &str = "support@schoolportal.example";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Longest session lifetime accepted: thirty days.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 30 * 24 * 60;

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("token_ttl_minutes must be positive, got {0}")]
    NonPositiveTokenTtl(i64),
    #[error("token_ttl_minutes must be at most {max}, got {0}", max = MAX_TOKEN_TTL_MINUTES)]
    TokenTtlTooLong(i64),
    #[error("support_contact must not be blank")]
    BlankSupportContact,
    #[error("db_max_connections must be at least 1")]
    EmptyPool,
    #[error("bind_addr '{0}' is not a socket address")]
    InvalidBindAddr(String),
}

/// Process-wide configuration, read once at startup.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Session token lifetime in minutes.
    pub token_ttl_minutes: Option<i64>,
    /// Contact named in refer code collision errors.
    pub support_contact: Option<String>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        match self.bind_addr.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_BIND_ADDR),
            Some(raw) => raw
                .parse()
                .map_err(|_| SettingsError::InvalidBindAddr(raw.to_owned())),
        }
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    pub fn token_ttl(&self) -> Result<Duration, SettingsError> {
        let minutes = self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        if minutes <= 0 {
            return Err(SettingsError::NonPositiveTokenTtl(minutes));
        }
        if minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(SettingsError::TokenTtlTooLong(minutes));
        }
        Duration::try_minutes(minutes).ok_or(SettingsError::TokenTtlTooLong(minutes))
    }

    pub fn support_contact(&self) -> Result<&str, SettingsError> {
        match self.support_contact.as_deref().map(str::trim) {
            None => Ok(DEFAULT_SUPPORT_CONTACT),
            Some("") => Err(SettingsError::BlankSupportContact),
            Some(contact) => Ok(contact),
        }
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("support_contact", &self.support_contact)
            .finish()
    }
}
