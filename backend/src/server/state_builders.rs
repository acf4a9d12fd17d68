//! Builders wiring adapters into the HTTP handler state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use bookshelf::domain::ports::StaticAccountDirectory;
use bookshelf::domain::{CatalogueService, TokenLifecycleService};
use bookshelf::inbound::http::state::HttpState;
use bookshelf::outbound::catalogue::CsvBookRepository;
use bookshelf::outbound::jwt::JwtTokenCodec;
use bookshelf::outbound::token_store::InMemoryRefreshTokenStore;

use super::ServerConfig;

/// Load the catalogue and assemble the token and catalogue services.
///
/// A missing data file yields an empty catalogue whose health endpoint
/// reports an error. A file that exists but cannot be read aborts startup.
///
/// # Errors
/// Returns [`io::Error`] when the data file cannot be read.
pub(crate) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let repository = CsvBookRepository::load(config.data_path())
        .map_err(|error| io::Error::other(format!("catalogue load failed: {error}")))?;
    let catalogue = Arc::new(CatalogueService::new(Arc::new(repository)));

    let codec = JwtTokenCodec::new(&config.tokens.secret, config.tokens.algorithm);
    let tokens = TokenLifecycleService::new(
        Arc::new(StaticAccountDirectory::default()),
        Arc::new(InMemoryRefreshTokenStore::new()),
        Arc::new(codec),
        Arc::new(DefaultClock),
    )
    .with_lifetimes(config.tokens.lifetimes);
    info!(
        algorithm = ?config.tokens.algorithm,
        access_minutes = config.tokens.lifetimes.access.num_minutes(),
        refresh_days = config.tokens.lifetimes.refresh.num_days(),
        "token service configured"
    );

    Ok(web::Data::new(HttpState::new(Arc::new(tokens), catalogue)))
}
