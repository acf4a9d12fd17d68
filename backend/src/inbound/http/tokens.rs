//! Bearer token endpoints.
//!
//! ```text
//! POST /api/v1/auth/login {"username":"usuario","password":"teste"}
//! POST /api/v1/auth/refresh {"refresh_token":"<jwt>"}
//! POST /api/v1/auth/revoke {"refresh_token":"<jwt>"}
//! GET /api/v1/auth/me
//! ```
//!
//! Token payloads keep OAuth2-style snake_case field names.

use actix_web::http::header::{CACHE_CONTROL, HeaderValue};
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{DomainError, LoginCredentials, TokenPair};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAccess;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_token;

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Account name.
    #[schema(example = "usuario")]
    pub username: String,
    /// Plain-text password.
    #[schema(example = "teste")]
    pub password: String,
}

/// Body carrying a refresh token, for rotation and revocation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RefreshRequest {
    /// Refresh token from a previous login or rotation.
    #[serde(alias = "refreshToken")]
    pub refresh_token: String,
}

/// Token pair returned by login and rotation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Short-lived access token for the `Authorization` header.
    pub access_token: String,
    /// Single-use refresh token.
    pub refresh_token: String,
    /// Always `bearer`.
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds.
    #[schema(example = 1800)]
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type.to_owned(),
            expires_in: pair.expires_in,
        }
    }
}

/// Identity behind the presented access token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Account the token was issued to.
    #[schema(example = "usuario")]
    pub subject: String,
    /// RFC 3339 expiry of the access token.
    #[schema(example = "2026-01-15T12:30:00+00:00")]
    pub expires_at: String,
}

fn token_response(pair: TokenPair) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, HeaderValue::from_static("no-store")))
        .json(TokenResponse::from(pair))
}

/// Exchange credentials for an access/refresh pair.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::new(username, password);
    let pair = state.tokens.login(&credentials).await?;
    Ok(token_response(pair))
}

/// Rotate a refresh token. The presented token is retired.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Rotated pair", body = TokenResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid or expired token", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/auth/refresh")]
pub async fn refresh(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<HttpResponse> {
    let RefreshRequest { refresh_token } = payload.into_inner();
    require_token("refresh_token", &refresh_token)?;
    let pair = state.tokens.refresh(&refresh_token).await?;
    Ok(token_response(pair))
}

/// Retire a refresh token. Unknown tokens are accepted silently.
#[utoipa::path(
    post,
    path = "/api/v1/auth/revoke",
    request_body = RefreshRequest,
    responses(
        (status = 204, description = "Token retired"),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "revokeToken",
    security([])
)]
#[post("/auth/revoke")]
pub async fn revoke(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<HttpResponse> {
    let RefreshRequest { refresh_token } = payload.into_inner();
    require_token("refresh_token", &refresh_token)?;
    state.tokens.revoke(&refresh_token).await?;
    debug!("refresh token revoked via API");
    Ok(HttpResponse::NoContent().finish())
}

/// Describe the caller's access token.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Token subject", body = MeResponse),
        (status = 401, description = "Missing or invalid access token", body = DomainError)
    ),
    tags = ["auth"],
    operation_id = "currentSubject",
    security(("BearerAuth" = []))
)]
#[get("/auth/me")]
pub async fn me(access: BearerAccess) -> ApiResult<web::Json<MeResponse>> {
    let expires_at = access
        .0
        .expires_at()
        .ok_or_else(|| DomainError::internal("token expiry is out of range"))?;
    Ok(web::Json(MeResponse {
        subject: access.subject().to_owned(),
        expires_at: expires_at.to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests;
