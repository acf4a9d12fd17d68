//! In-memory live set of refresh tokens.
//!
//! State lives for the lifetime of the process; a restart logs every client
//! out. Each operation takes the mutex once, so `remove` is an atomic
//! test-and-clear and concurrent rotations of one token cannot both win.
//! Every insert first drops members that expired before the new token was
//! issued, so the set is bounded by the tokens issued within one refresh
//! lifetime.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::TokenClaims;
use crate::domain::ports::{RefreshTokenStore, RefreshTokenStoreError};

/// Mutex-guarded map from token to its `exp` claim.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: Mutex<HashMap<String, i64>>,
}

impl InMemoryRefreshTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tokens.
    pub fn len(&self) -> Result<usize, RefreshTokenStoreError> {
        Ok(self.lock()?.len())
    }

    /// Whether no tokens are live.
    pub fn is_empty(&self) -> Result<bool, RefreshTokenStoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, i64>>, RefreshTokenStoreError> {
        self.tokens
            .lock()
            .map_err(|err| RefreshTokenStoreError::unavailable(format!("lock poisoned: {err}")))
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn insert(
        &self,
        token: &str,
        claims: &TokenClaims,
    ) -> Result<(), RefreshTokenStoreError> {
        let mut tokens = self.lock()?;
        let before = tokens.len();
        tokens.retain(|_, exp| *exp > claims.iat);
        let pruned = before - tokens.len();
        if pruned > 0 {
            debug!(pruned, "dropped expired refresh tokens");
        }
        tokens.insert(token.to_owned(), claims.exp);
        Ok(())
    }

    async fn remove(&self, token: &str) -> Result<bool, RefreshTokenStoreError> {
        Ok(self.lock()?.remove(token).is_some())
    }

    async fn contains(&self, token: &str) -> Result<bool, RefreshTokenStoreError> {
        Ok(self.lock()?.contains_key(token))
    }
}
