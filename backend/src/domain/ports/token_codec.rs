//! Driven port that signs and decodes token claims.
//!
//! Codecs check signatures and structure only. Expiry is evaluated by the
//! token service against its injected clock so tests can move time freely.

use crate::domain::TokenClaims;

use super::define_port_error;

define_port_error! {
    /// Errors raised while encoding or decoding tokens.
    pub enum TokenCodecError {
        /// Claims could not be signed.
        Encode { message: String } => "token encoding failed: {message}",
        /// Token is malformed, forged or otherwise unreadable.
        Rejected { message: String } => "token rejected: {message}",
    }
}

/// Signs claims into compact strings and reads them back.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` into a token string.
    fn encode(&self, claims: &TokenClaims) -> Result<String, TokenCodecError>;

    /// Verify the signature of `token` and return its claims.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError>;
}

/// Unsigned codec for tests that do not exercise cryptography.
///
/// Tokens are `fixture.` followed by the JSON claims. Anything without the
/// prefix is rejected, standing in for a bad signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenCodec;

const FIXTURE_PREFIX: &str = "fixture.";

impl TokenCodec for FixtureTokenCodec {
    fn encode(&self, claims: &TokenClaims) -> Result<String, TokenCodecError> {
        let body = serde_json::to_string(claims)
            .map_err(|err| TokenCodecError::encode(err.to_string()))?;
        Ok(format!("{FIXTURE_PREFIX}{body}"))
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenCodecError> {
        let body = token
            .strip_prefix(FIXTURE_PREFIX)
            .ok_or_else(|| TokenCodecError::rejected("missing fixture prefix"))?;
        serde_json::from_str(body).map_err(|err| TokenCodecError::rejected(err.to_string()))
    }
}
