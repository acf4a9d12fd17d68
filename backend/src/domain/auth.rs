//! Authentication primitives: login credentials, token claims and token pairs.
//!
//! Inbound adapters build [`LoginCredentials`] from raw payload strings before
//! calling the token service. Claims and pairs are plain values shared by the
//! token lifecycle service and the codec port.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Login credentials as presented by the caller.
///
/// Both parts are kept verbatim. A padded or blank username is simply an
/// unknown account, and a blank password is a digest mismatch, so neither is
/// rejected here.
///
/// # Examples
/// ```
/// use bookshelf::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new(" usuario ", "teste");
/// assert_eq!(creds.username(), " usuario ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Wrap raw username and password inputs.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username used for directory lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plain-text password as supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Purpose of a bearer token, carried in its `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on protected requests.
    Access,
    /// Long-lived credential exchanged for a new pair.
    Refresh,
}

impl TokenKind {
    /// Claim value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in every issued token.
///
/// Timestamps are whole seconds since the Unix epoch. `jti` is random per
/// token, so two tokens minted for one subject in the same second differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the account username).
    pub sub: String,
    /// Expiry instant.
    pub exp: i64,
    /// Issue instant.
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
    /// Token purpose.
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl TokenClaims {
    /// Build claims for `subject` issued at `now` and valid for `ttl`.
    #[must_use]
    pub fn issue(subject: &str, kind: TokenKind, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: subject.to_owned(),
            exp: iat.saturating_add(ttl.num_seconds()),
            iat,
            jti: Uuid::new_v4().to_string(),
            kind,
        }
    }

    /// Whether the token has expired at `now`. Expiry is inclusive.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiry as a timestamp, when representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Token scheme label returned alongside every pair.
pub const BEARER: &str = "bearer";

/// Access/refresh pair handed to a client after login or rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed access token.
    pub access_token: String,
    /// Signed refresh token, registered in the live set.
    pub refresh_token: String,
    /// Always [`BEARER`].
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Lifetimes applied to newly minted tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Access token lifetime.
    pub access: Duration,
    /// Refresh token lifetime.
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(30),
            refresh: Duration::days(7),
        }
    }
}
