//! Bearer token lifecycle: login, verification, rotation and revocation.
//!
//! Access tokens are stateless and honoured until they expire. Refresh tokens
//! are additionally tracked in a live set and are single-use: rotating one
//! removes it from the set before a replacement pair is minted, and revoking
//! one simply removes it.
//!
//! Every rejection of a presented token is reported as the same
//! [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized) error,
//! whether the token was forged, expired, of the wrong kind or already
//! retired. Failures of the live set or the signer surface as internal errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountDirectory, AccountDirectoryError, RefreshTokenStore, RefreshTokenStoreError,
    TokenCodec, TokenCodecError, TokenService,
};
use crate::domain::{
    BEARER, DomainError, LoginCredentials, TokenClaims, TokenKind, TokenLifetimes, TokenPair,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const INVALID_TOKEN: &str = "invalid or expired token";

/// Token lifecycle service implementing [`TokenService`].
#[derive(Clone)]
pub struct TokenLifecycleService<A, S, C> {
    accounts: Arc<A>,
    live_set: Arc<S>,
    codec: Arc<C>,
    clock: Arc<dyn Clock>,
    lifetimes: TokenLifetimes,
}

impl<A, S, C> TokenLifecycleService<A, S, C> {
    /// Create a service using the default token lifetimes.
    #[must_use]
    pub fn new(accounts: Arc<A>, live_set: Arc<S>, codec: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            live_set,
            codec,
            clock,
            lifetimes: TokenLifetimes::default(),
        }
    }

    /// Override the access and refresh lifetimes.
    #[must_use]
    pub fn with_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    /// Lifetimes applied to newly minted tokens.
    #[must_use]
    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }
}

fn map_directory_error(error: AccountDirectoryError) -> DomainError {
    DomainError::internal(error.to_string())
}

fn map_store_error(error: RefreshTokenStoreError) -> DomainError {
    DomainError::internal(error.to_string())
}

fn rejected() -> DomainError {
    DomainError::unauthorized(INVALID_TOKEN)
}

impl<A, S, C> TokenLifecycleService<A, S, C>
where
    A: AccountDirectory,
    S: RefreshTokenStore,
    C: TokenCodec,
{
    /// Decode `token` and check expiry and kind. Live-set membership is left
    /// to the caller.
    fn decode_checked(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, DomainError> {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(error) => {
                debug!(%error, kind = %expected, "rejected token");
                return Err(rejected());
            }
        };
        if claims.is_expired_at(self.clock.utc()) {
            debug!(kind = %expected, exp = claims.exp, "rejected expired token");
            return Err(rejected());
        }
        if claims.kind != expected {
            debug!(expected = %expected, actual = %claims.kind, "rejected token of wrong kind");
            return Err(rejected());
        }
        Ok(claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, DomainError> {
        self.codec.encode(claims).map_err(|error| match error {
            TokenCodecError::Encode { message } | TokenCodecError::Rejected { message } => {
                DomainError::internal(format!("token signing failed: {message}"))
            }
        })
    }

    async fn mint_pair(&self, subject: &str) -> Result<TokenPair, DomainError> {
        let now = self.clock.utc();
        let access = TokenClaims::issue(subject, TokenKind::Access, now, self.lifetimes.access);
        let refresh = TokenClaims::issue(subject, TokenKind::Refresh, now, self.lifetimes.refresh);

        let access_token = self.sign(&access)?;
        let refresh_token = self.sign(&refresh)?;
        self.live_set
            .insert(&refresh_token, &refresh)
            .await
            .map_err(map_store_error)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: BEARER,
            expires_in: self.lifetimes.access.num_seconds(),
        })
    }
}

#[async_trait]
impl<A, S, C> TokenService for TokenLifecycleService<A, S, C>
where
    A: AccountDirectory,
    S: RefreshTokenStore,
    C: TokenCodec,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<bool, DomainError> {
        let account = self
            .accounts
            .find_by_username(credentials.username())
            .await
            .map_err(map_directory_error)?;
        Ok(account.is_some_and(|account| {
            account.password_digest().matches(credentials.password())
        }))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, DomainError> {
        if !self.authenticate(credentials).await? {
            info!(username = credentials.username(), "login rejected");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }
        let pair = self.mint_pair(credentials.username()).await?;
        info!(username = credentials.username(), "login succeeded");
        Ok(pair)
    }

    async fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, DomainError> {
        let claims = self.decode_checked(token, expected)?;
        if expected == TokenKind::Refresh {
            let live = self
                .live_set
                .contains(token)
                .await
                .map_err(map_store_error)?;
            if !live {
                debug!("rejected refresh token outside the live set");
                return Err(rejected());
            }
        }
        Ok(claims)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.decode_checked(refresh_token, TokenKind::Refresh)?;
        if claims.sub.trim().is_empty() {
            debug!("rejected refresh token without subject");
            return Err(rejected());
        }
        let removed = self
            .live_set
            .remove(refresh_token)
            .await
            .map_err(map_store_error)?;
        if !removed {
            debug!(subject = %claims.sub, "rejected retired refresh token");
            return Err(rejected());
        }
        let pair = self.mint_pair(&claims.sub).await?;
        info!(subject = %claims.sub, "refresh token rotated");
        Ok(pair)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        let removed = self
            .live_set
            .remove(refresh_token)
            .await
            .map_err(map_store_error)?;
        debug!(removed, "refresh token revoked");
        Ok(())
    }
}
