//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{FixtureBookRepository, FixtureTokenCodec, StaticAccountDirectory};
use crate::domain::{Book, BookId, CatalogueService, Rating, TokenLifecycleService};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::token_store::InMemoryRefreshTokenStore;
use crate::test_support::clock::MutableClock;

/// Seconds since the epoch the test clock starts at.
pub(crate) const CLOCK_START: i64 = 1_700_000_000;

/// Even ids are out of stock.
pub(crate) fn book(id: u32, title: &str, category: &str, price: f64, stars: i64) -> Book {
    let availability = if id % 2 == 0 { "Out of stock" } else { "In stock" };
    Book {
        id: BookId::new(id),
        title: title.to_owned(),
        price,
        rating: Rating::try_from(stars).expect("valid rating"),
        availability: availability.to_owned(),
        category: category.to_owned(),
        image_url: format!("https://example.test/{id}.jpg"),
    }
}

/// Five records across three categories. Id 3 is absent.
pub(crate) fn sample_books() -> Vec<Book> {
    vec![
        book(1, "A Light in the Attic", "Poetry", 51.77, 3),
        book(2, "Tipping the Velvet", "Historical Fiction", 53.74, 5),
        book(4, "Sharp Objects", "Mystery", 47.82, 4),
        book(5, "The Black Maria", "Poetry", 52.15, 5),
        book(6, "Olio", "Poetry", 23.88, 1),
    ]
}

/// HTTP state over fixture adapters plus the clock driving token expiry.
pub(crate) struct TestContext {
    pub(crate) state: HttpState,
    pub(crate) clock: Arc<MutableClock>,
}

impl TestContext {
    pub(crate) fn with_books(books: Vec<Book>) -> Self {
        let clock = Arc::new(MutableClock::at_epoch_offset(CLOCK_START));
        let tokens = TokenLifecycleService::new(
            Arc::new(StaticAccountDirectory::default()),
            Arc::new(InMemoryRefreshTokenStore::new()),
            Arc::new(FixtureTokenCodec),
            clock.clone(),
        );
        let catalogue = CatalogueService::new(Arc::new(FixtureBookRepository::new(books)));
        Self {
            state: HttpState::new(Arc::new(tokens), Arc::new(catalogue)),
            clock,
        }
    }

    pub(crate) fn sample() -> Self {
        Self::with_books(sample_books())
    }

    pub(crate) fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure))
    }
}
