//! Health endpoints.
//!
//! - `GET /api/v1/health` reports whether the catalogue data is usable.
//! - `GET /health/ready` and `GET /health/live` are orchestration probes
//!   backed by [`HealthState`].

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DataHealth, DomainError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Readiness and liveness flags shared with the probes.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready, but live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready once the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes so orchestrators drain the instance.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Readiness flag.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Liveness flag.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe: 200 once the server accepts traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Catalogue data availability.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataHealthResponse {
    /// `healthy`, `warning` or `error`.
    #[schema(example = "healthy")]
    pub status: String,
    /// Human-readable explanation of the status.
    #[schema(example = "serving 1000 books")]
    pub message: String,
    /// Number of loaded records.
    #[schema(example = 1000)]
    pub total_books: usize,
    /// Whether the configured data file existed at startup.
    pub data_file_exists: bool,
}

impl From<DataHealth> for DataHealthResponse {
    fn from(health: DataHealth) -> Self {
        Self {
            status: health.status.as_str().to_owned(),
            message: health.message,
            total_books: health.total_books,
            data_file_exists: health.source_found,
        }
    }
}

/// Report how many records are loaded and whether the data file existed.
///
/// Always answers 200; the `status` field carries the verdict.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Data health report", body = DataHealthResponse),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["health"],
    operation_id = "dataHealth",
    security([])
)]
#[get("/health")]
pub async fn data_health(state: web::Data<HttpState>) -> ApiResult<web::Json<DataHealthResponse>> {
    Ok(web::Json(state.catalogue.health().await?.into()))
}
