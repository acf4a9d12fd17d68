//! Driven port for account lookups.

use async_trait::async_trait;

use crate::domain::Account;

use super::define_port_error;

define_port_error! {
    /// Errors raised when the account directory cannot be consulted.
    pub enum AccountDirectoryError {
        /// Backing directory could not be read.
        Unavailable { message: String } => "account directory unavailable: {message}",
    }
}

/// Read-only directory of accounts that may log in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find the account registered under `username`.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountDirectoryError>;
}

/// Username of the built-in account.
pub const DEFAULT_USERNAME: &str = "usuario";
/// Password of the built-in account.
pub const DEFAULT_PASSWORD: &str = "teste";

/// Directory backed by a fixed list of accounts.
///
/// The default instance holds the single built-in account.
#[derive(Debug, Clone)]
pub struct StaticAccountDirectory {
    accounts: Vec<Account>,
}

impl StaticAccountDirectory {
    /// Directory serving exactly `accounts`.
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

impl Default for StaticAccountDirectory {
    fn default() -> Self {
        Self::new(vec![Account::with_password(
            DEFAULT_USERNAME,
            DEFAULT_PASSWORD,
        )])
    }
}

#[async_trait]
impl AccountDirectory for StaticAccountDirectory {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountDirectoryError> {
        Ok(self
            .accounts
            .iter()
            .find(|account| account.username() == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("usuario", true)]
    #[case("USUARIO", false)]
    #[case("admin", false)]
    #[tokio::test]
    async fn default_directory_holds_one_account(#[case] username: &str, #[case] found: bool) {
        let directory = StaticAccountDirectory::default();
        let account = directory
            .find_by_username(username)
            .await
            .expect("static lookups never fail");
        assert_eq!(account.is_some(), found);
    }

    #[rstest]
    #[tokio::test]
    async fn default_account_uses_default_password() {
        let account = StaticAccountDirectory::default()
            .find_by_username(DEFAULT_USERNAME)
            .await
            .expect("lookup succeeds")
            .expect("account present");
        assert!(account.password_digest().matches(DEFAULT_PASSWORD));
    }
}
