//! Driven port for the set of live refresh tokens.
//!
//! A refresh token is only honoured while it is a member of this set. Removal
//! reports whether the token was present, which is what makes rotation
//! single-use: of two concurrent removals of one token, exactly one observes
//! `true`.
//!
//! Each member carries its expiry so stores can drop tokens that lapsed
//! without being rotated or revoked.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::TokenClaims;

define_port_error! {
    /// Errors raised by refresh token stores.
    pub enum RefreshTokenStoreError {
        /// Store state could not be read or written.
        Unavailable { message: String } => "refresh token store unavailable: {message}",
    }
}

/// Live set of refresh tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Add `token`, signed from `claims`, to the live set.
    ///
    /// Members whose expiry is at or before `claims.iat` may be dropped.
    async fn insert(
        &self,
        token: &str,
        claims: &TokenClaims,
    ) -> Result<(), RefreshTokenStoreError>;

    /// Remove `token`, returning whether it was present.
    async fn remove(&self, token: &str) -> Result<bool, RefreshTokenStoreError>;

    /// Whether `token` is currently live.
    async fn contains(&self, token: &str) -> Result<bool, RefreshTokenStoreError>;
}
