//! Bearer token extraction for school-scoped endpoints.
//!
//! Handlers that take a [`SchoolSession`] only run once the token has been
//! verified and its school re-resolved. The check is repeated on every
//! request; nothing about a token is cached between calls.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::failures::not_logged_in;
use crate::domain::{Error, SchoolIdentity};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer credential from the `Authorization` header.
///
/// Returns `None` when the header is absent, not valid ASCII or uses another
/// scheme.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_at_checked(BEARER_PREFIX.len())?;
    scheme
        .eq_ignore_ascii_case(BEARER_PREFIX)
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}

/// Authenticated school derived from the request's bearer token.
#[derive(Debug, Clone)]
pub struct SchoolSession(SchoolIdentity);

impl SchoolSession {
    pub fn identity(&self) -> &SchoolIdentity {
        &self.0
    }
}

impl FromRequest for SchoolSession {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req).map(str::to_owned);

        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            let token = token.ok_or_else(not_logged_in)?;
            let identity = state.sessions.authorize(&token).await?;
            Ok(SchoolSession(identity))
        })
    }
}
