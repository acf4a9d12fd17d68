//! Bearer token extraction for protected handlers.
//!
//! Keep HTTP handlers focused on request/response mapping by concentrating
//! header parsing and access token verification here.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DomainError, TokenClaims, TokenKind};
use crate::inbound::http::state::HttpState;

const SCHEME: &str = "bearer";

/// Verified access token claims for the current request.
///
/// Extraction fails with `401 Unauthorized` when the `Authorization` header
/// is missing, uses another scheme, or carries a token the lifecycle service
/// rejects.
#[derive(Debug, Clone)]
pub struct BearerAccess(pub TokenClaims);

impl BearerAccess {
    /// Subject the token was issued to.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.0.sub
    }
}

/// Pull the raw token out of an `Authorization: Bearer <token>` value.
pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(SCHEME) && !token.is_empty()).then_some(token)
}

impl FromRequest for BearerAccess {
    type Error = DomainError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);

        Box::pin(async move {
            let state =
                state.ok_or_else(|| DomainError::internal("HTTP state is not configured"))?;
            let token = token.ok_or_else(|| DomainError::unauthorized("missing bearer token"))?;
            let claims = state.tokens.verify(&token, TokenKind::Access).await?;
            Ok(Self(claims))
        })
    }
}
