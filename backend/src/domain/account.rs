//! Accounts known to the token service.

use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 digest of a password.
///
/// # Examples
/// ```
/// use bookshelf::domain::PasswordDigest;
///
/// let digest = PasswordDigest::of("teste");
/// assert!(digest.matches("teste"));
/// assert!(!digest.matches("wrong"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plain-text password.
    #[must_use]
    pub fn of(password: &str) -> Self {
        Self(hex::encode(Sha256::digest(password.as_bytes())))
    }

    /// Wrap an existing hex digest. Case is normalised.
    #[must_use]
    pub fn from_hex(hex_digest: &str) -> Self {
        Self(hex_digest.trim().to_ascii_lowercase())
    }

    /// Compare against a plain-text password.
    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        Self::of(password) == *self
    }

    /// Hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A username with its password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    username: String,
    password_digest: PasswordDigest,
}

impl Account {
    /// Build an account from a username and an existing digest.
    #[must_use]
    pub fn new(username: impl Into<String>, password_digest: PasswordDigest) -> Self {
        Self {
            username: username.into(),
            password_digest,
        }
    }

    /// Build an account by digesting a plain-text password.
    #[must_use]
    pub fn with_password(username: impl Into<String>, password: &str) -> Self {
        Self::new(username, PasswordDigest::of(password))
    }

    /// Account username, also used as the token subject.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Stored password digest.
    #[must_use]
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }
}
