//! Application wiring shared by the HTTP integration suites.
//!
//! Mirrors the server's `/api/v1` scope with real adapters: the CSV
//! repository, the JWT codec and the in-memory live set.

use std::path::Path;
use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use bookshelf::Trace;
use bookshelf::config::SigningAlgorithm;
use bookshelf::domain::ports::StaticAccountDirectory;
use bookshelf::domain::{CatalogueService, TokenLifecycleService};
use bookshelf::inbound::http::configure;
use bookshelf::inbound::http::state::HttpState;
use bookshelf::outbound::catalogue::CsvBookRepository;
use bookshelf::outbound::jwt::JwtTokenCodec;
use bookshelf::outbound::token_store::InMemoryRefreshTokenStore;
use mockable::DefaultClock;

const SECRET: &[u8] = b"integration-suite-secret-0123456789";

/// Build handler state serving the catalogue at `data_path`.
pub(crate) fn http_state(data_path: &Path) -> web::Data<HttpState> {
    let repository = CsvBookRepository::load(data_path).expect("catalogue should load");
    let tokens = TokenLifecycleService::new(
        Arc::new(StaticAccountDirectory::default()),
        Arc::new(InMemoryRefreshTokenStore::new()),
        Arc::new(JwtTokenCodec::new(SECRET, SigningAlgorithm::Hs256)),
        Arc::new(DefaultClock),
    );
    let catalogue = CatalogueService::new(Arc::new(repository));
    web::Data::new(HttpState::new(Arc::new(tokens), Arc::new(catalogue)))
}

/// Application with the `/api/v1` scope and request tracing.
pub(crate) fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
}
