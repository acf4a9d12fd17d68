//! Driving port for the bearer token lifecycle.
//!
//! Inbound adapters log users in, rotate and revoke refresh tokens, and verify
//! access tokens through this port without knowing how tokens are signed or
//! where the live set is kept.

use async_trait::async_trait;

use crate::domain::{DomainError, LoginCredentials, TokenClaims, TokenKind, TokenPair};

/// Token lifecycle use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Check credentials against the account directory without side effects.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, DomainError>;

    /// Authenticate and issue a fresh token pair.
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, DomainError>;

    /// Validate `token` as a token of `expected` kind and return its claims.
    async fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, DomainError>;

    /// Exchange a live refresh token for a new pair, retiring the old token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError>;

    /// Retire a refresh token. Unknown tokens are ignored.
    async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError>;
}
