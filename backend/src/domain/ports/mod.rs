//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`AccountDirectory`, `RefreshTokenStore`, `TokenCodec`,
//! `BookRepository`) are implemented by outbound adapters and expose typed
//! errors. Driving ports (`TokenService`, `CatalogueQuery`,
//! `CatalogueStatsQuery`, `BookInsightsQuery`) are called by inbound adapters
//! and speak [`DomainError`](crate::domain::DomainError).

mod macros;
pub(crate) use macros::define_port_error;

mod account_directory;
mod book_insights_query;
mod book_repository;
mod catalogue_query;
mod catalogue_stats_query;
mod refresh_token_store;
mod token_codec;
mod token_service;

#[cfg(test)]
pub use account_directory::MockAccountDirectory;
pub use account_directory::{
    AccountDirectory, AccountDirectoryError, DEFAULT_PASSWORD, DEFAULT_USERNAME,
    StaticAccountDirectory,
};
#[cfg(test)]
pub use book_insights_query::MockBookInsightsQuery;
pub use book_insights_query::BookInsightsQuery;
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{
    BookRepository, BookRepositoryError, CatalogueSnapshot, FixtureBookRepository,
};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::{BookSearch, CatalogueQuery, PriceRangeMatch};
#[cfg(test)]
pub use catalogue_stats_query::MockCatalogueStatsQuery;
pub use catalogue_stats_query::CatalogueStatsQuery;
#[cfg(test)]
pub use refresh_token_store::MockRefreshTokenStore;
pub use refresh_token_store::{RefreshTokenStore, RefreshTokenStoreError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{FixtureTokenCodec, TokenCodec, TokenCodecError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::TokenService;
