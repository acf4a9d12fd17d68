//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request/response schemas, and the bearer JWT security scheme. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` exports it.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::books::{BookResponse, PriceRangeResponse, SearchResponse};
use crate::inbound::http::health::DataHealthResponse;
use crate::inbound::http::insights::{
    BookFeaturesResponse, PredictionRequest, PredictionResponse, TrainingExampleResponse,
};
use crate::inbound::http::stats::{
    CategoryStatsListResponse, CategoryStatsResponse, StatsOverviewResponse,
};
use crate::inbound::http::tokens::{LoginRequest, MeResponse, RefreshRequest, TokenResponse};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_owned());
        scheme.description =
            Some("Access token issued by POST /api/v1/auth/login.".to_owned());
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookshelf catalogue API",
        description = "Read-only book catalogue with bearer-token authentication and heuristic rating predictions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tokens::login,
        crate::inbound::http::tokens::refresh,
        crate::inbound::http::tokens::revoke,
        crate::inbound::http::tokens::me,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::search_books,
        crate::inbound::http::books::top_rated_books,
        crate::inbound::http::books::books_by_price,
        crate::inbound::http::books::list_categories,
        crate::inbound::http::stats::overview,
        crate::inbound::http::stats::category_stats,
        crate::inbound::http::health::data_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::insights::features,
        crate::inbound::http::insights::training_data,
        crate::inbound::http::insights::predict,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        LoginRequest,
        RefreshRequest,
        TokenResponse,
        MeResponse,
        BookResponse,
        SearchResponse,
        PriceRangeResponse,
        StatsOverviewResponse,
        CategoryStatsResponse,
        CategoryStatsListResponse,
        DataHealthResponse,
        BookFeaturesResponse,
        TrainingExampleResponse,
        PredictionRequest,
        PredictionResponse,
    )),
    tags(
        (name = "auth", description = "Token issue, rotation and revocation"),
        (name = "books", description = "Catalogue queries"),
        (name = "stats", description = "Aggregate statistics"),
        (name = "ml", description = "Feature encoding and rating prediction"),
        (name = "health", description = "Data health and orchestration probes")
    )
)]
pub struct ApiDoc;
