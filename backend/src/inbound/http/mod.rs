//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] registers every `/api/v1` handler together with the
//! extractor configs that turn decoding failures into JSON errors. The server
//! mounts it under a scope; tests mount it on a bare `App`.

pub mod auth;
pub mod books;
pub mod error;
pub mod health;
pub mod insights;
pub mod state;
pub mod stats;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tokens;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the API handlers on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bookshelf::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(tokens::login)
        .service(tokens::refresh)
        .service(tokens::revoke)
        .service(tokens::me)
        // Literal book routes must precede `/books/{id}`.
        .service(books::search_books)
        .service(books::top_rated_books)
        .service(books::books_by_price)
        .service(books::get_book)
        .service(books::list_books)
        .service(books::list_categories)
        .service(stats::overview)
        .service(stats::category_stats)
        .service(health::data_health)
        .service(insights::features)
        .service(insights::training_data)
        .service(insights::predict);
}
