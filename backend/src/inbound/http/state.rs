//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only on
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookInsightsQuery, CatalogueQuery, CatalogueStatsQuery, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login, verification, rotation and revocation.
    pub tokens: Arc<dyn TokenService>,
    /// Record lookups and filters.
    pub catalogue: Arc<dyn CatalogueQuery>,
    /// Aggregate statistics.
    pub stats: Arc<dyn CatalogueStatsQuery>,
    /// Feature encoding and rating prediction.
    pub insights: Arc<dyn BookInsightsQuery>,
}

impl HttpState {
    /// Build state where one service answers every catalogue port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookshelf::domain::ports::{
    ///     FixtureBookRepository, FixtureTokenCodec, StaticAccountDirectory,
    /// };
    /// use bookshelf::domain::{CatalogueService, TokenLifecycleService};
    /// use bookshelf::inbound::http::state::HttpState;
    /// use bookshelf::outbound::token_store::InMemoryRefreshTokenStore;
    /// use mockable::DefaultClock;
    ///
    /// let tokens = TokenLifecycleService::new(
    ///     Arc::new(StaticAccountDirectory::default()),
    ///     Arc::new(InMemoryRefreshTokenStore::new()),
    ///     Arc::new(FixtureTokenCodec),
    ///     Arc::new(DefaultClock),
    /// );
    /// let catalogue = CatalogueService::new(Arc::new(FixtureBookRepository::default()));
    /// let state = HttpState::new(Arc::new(tokens), Arc::new(catalogue));
    /// let _stats = state.stats.clone();
    /// ```
    #[must_use]
    pub fn new<C>(tokens: Arc<dyn TokenService>, catalogue: Arc<C>) -> Self
    where
        C: CatalogueQuery + CatalogueStatsQuery + BookInsightsQuery + 'static,
    {
        Self {
            tokens,
            catalogue: catalogue.clone(),
            stats: catalogue.clone(),
            insights: catalogue,
        }
    }
}
