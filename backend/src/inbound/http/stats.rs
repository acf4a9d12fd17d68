//! Aggregate statistics endpoints.
//!
//! ```text
//! GET /api/v1/stats/overview
//! GET /api/v1/stats/categories
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CatalogueOverview, CategoryBreakdown, CategoryStats, DomainError, RatingHistogram,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Star count (`"1"` to `"5"`) to number of records.
pub type RatingDistribution = BTreeMap<String, u64>;

fn distribution(histogram: &RatingHistogram) -> RatingDistribution {
    histogram
        .iter()
        .map(|(stars, count)| (stars.to_string(), count))
        .collect()
}

/// Collection-wide figures.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverviewResponse {
    /// Number of loaded records.
    #[schema(example = 1000)]
    pub total_books: usize,
    /// Absent when no records are loaded.
    pub average_price: Option<f64>,
    /// Absent when no records are loaded.
    pub min_price: Option<f64>,
    /// Absent when no records are loaded.
    pub max_price: Option<f64>,
    /// Count per star rating.
    #[schema(example = json!({"1": 226, "2": 196, "3": 203, "4": 179, "5": 196}))]
    pub rating_distribution: RatingDistribution,
}

impl From<CatalogueOverview> for StatsOverviewResponse {
    fn from(summary: CatalogueOverview) -> Self {
        Self {
            total_books: summary.total_books,
            average_price: summary.price.map(|p| p.mean),
            min_price: summary.price.map(|p| p.min),
            max_price: summary.price.map(|p| p.max),
            rating_distribution: distribution(&summary.rating_distribution),
        }
    }
}

/// Figures for one category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatsResponse {
    /// Category name.
    #[schema(example = "Poetry")]
    pub category: String,
    /// Records in the category.
    pub total_books: usize,
    /// Mean price.
    pub average_price: f64,
    /// Lowest price.
    pub min_price: f64,
    /// Highest price.
    pub max_price: f64,
    /// Mean star rating.
    pub average_rating: f64,
    /// Count per star rating.
    pub rating_distribution: RatingDistribution,
}

impl From<CategoryStats> for CategoryStatsResponse {
    fn from(stats: CategoryStats) -> Self {
        Self {
            rating_distribution: distribution(&stats.rating_distribution),
            category: stats.category,
            total_books: stats.total_books,
            average_price: stats.price.mean,
            min_price: stats.price.min,
            max_price: stats.price.max,
            average_rating: stats.mean_rating,
        }
    }
}

/// Per-category figures, sorted by category name.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatsListResponse {
    /// Per-category figures, sorted by name.
    pub categories: Vec<CategoryStatsResponse>,
    /// Number of categories.
    pub total_categories: usize,
}

impl From<CategoryBreakdown> for CategoryStatsListResponse {
    fn from(breakdown: CategoryBreakdown) -> Self {
        let total_categories = breakdown.total_categories();
        Self {
            categories: breakdown
                .categories
                .into_iter()
                .map(CategoryStatsResponse::from)
                .collect(),
            total_categories,
        }
    }
}

/// Count, price summary and rating histogram for the whole collection.
#[utoipa::path(
    get,
    path = "/api/v1/stats/overview",
    responses(
        (status = 200, description = "Collection statistics", body = StatsOverviewResponse),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["stats"],
    operation_id = "statsOverview",
    security([])
)]
#[get("/stats/overview")]
pub async fn overview(state: web::Data<HttpState>) -> ApiResult<web::Json<StatsOverviewResponse>> {
    Ok(web::Json(state.stats.overview().await?.into()))
}

/// The same figures grouped by category.
#[utoipa::path(
    get,
    path = "/api/v1/stats/categories",
    responses(
        (status = 200, description = "Per-category statistics", body = CategoryStatsListResponse),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["stats"],
    operation_id = "statsByCategory",
    security([])
)]
#[get("/stats/categories")]
pub async fn category_stats(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CategoryStatsListResponse>> {
    Ok(web::Json(state.stats.category_stats().await?.into()))
}
