//! Feature encoding and rating prediction endpoints.
//!
//! ```text
//! GET /api/v1/ml/features
//! GET /api/v1/ml/training-data
//! POST /api/v1/ml/predictions {"price":25.0,"category":"Poetry","inStock":true}
//! ```
//!
//! All three require a bearer access token.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{BookFeatures, DomainError, PredictionInput, RatingPrediction, TrainingExample};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAccess;
use crate::inbound::http::state::HttpState;

/// Numeric encoding of one record.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookFeaturesResponse {
    /// Record position.
    #[schema(example = 1)]
    pub book_id: u32,
    /// Price in pounds.
    #[schema(example = 51.77)]
    pub price: f64,
    /// Star rating.
    #[schema(example = 3)]
    pub rating: u8,
    /// Position of the category in `GET /api/v1/categories`.
    #[schema(example = 2)]
    pub category_index: usize,
    /// Whether the record is in stock.
    pub in_stock: bool,
}

impl From<BookFeatures> for BookFeaturesResponse {
    fn from(encoded: BookFeatures) -> Self {
        Self {
            book_id: encoded.book_id.get(),
            price: encoded.price,
            rating: encoded.rating,
            category_index: encoded.category_index,
            in_stock: encoded.in_stock,
        }
    }
}

/// Features paired with the observed rating.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingExampleResponse {
    /// Encoded inputs.
    pub features: BookFeaturesResponse,
    /// Observed star rating.
    #[schema(example = 3)]
    pub target: u8,
}

impl From<TrainingExample> for TrainingExampleResponse {
    fn from(example: TrainingExample) -> Self {
        Self {
            features: example.features.into(),
            target: example.target,
        }
    }
}

/// Inputs for a rating prediction.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// Price in pounds.
    #[schema(example = 25.0)]
    pub price: f64,
    /// Category name, matched exactly.
    #[schema(example = "Poetry")]
    pub category: String,
    /// Whether the book is in stock.
    #[serde(default)]
    pub in_stock: bool,
}

impl From<PredictionRequest> for PredictionInput {
    fn from(request: PredictionRequest) -> Self {
        Self {
            price: request.price,
            category: request.category,
            in_stock: request.in_stock,
        }
    }
}

/// Heuristic rating prediction.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    /// Predicted rating between 1.0 and 5.0.
    #[schema(example = 3.25)]
    pub predicted_rating: f64,
    /// Whether the category appears in the loaded data.
    pub category_known: bool,
}

impl From<RatingPrediction> for PredictionResponse {
    fn from(prediction: RatingPrediction) -> Self {
        Self {
            predicted_rating: prediction.predicted_rating,
            category_known: prediction.category_known,
        }
    }
}

/// Encoded features for every record.
#[utoipa::path(
    get,
    path = "/api/v1/ml/features",
    responses(
        (status = 200, description = "Encoded features", body = [BookFeaturesResponse]),
        (status = 401, description = "Missing or invalid access token", body = DomainError)
    ),
    tags = ["ml"],
    operation_id = "mlFeatures",
    security(("BearerAuth" = []))
)]
#[get("/ml/features")]
pub async fn features(
    access: BearerAccess,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<BookFeaturesResponse>>> {
    debug!(subject = access.subject(), "features requested");
    let encoded = state.insights.features().await?;
    Ok(web::Json(encoded.into_iter().map(Into::into).collect()))
}

/// Encoded features paired with ratings.
#[utoipa::path(
    get,
    path = "/api/v1/ml/training-data",
    responses(
        (status = 200, description = "Training examples", body = [TrainingExampleResponse]),
        (status = 401, description = "Missing or invalid access token", body = DomainError)
    ),
    tags = ["ml"],
    operation_id = "mlTrainingData",
    security(("BearerAuth" = []))
)]
#[get("/ml/training-data")]
pub async fn training_data(
    access: BearerAccess,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TrainingExampleResponse>>> {
    debug!(subject = access.subject(), "training data requested");
    let examples = state.insights.training_data().await?;
    Ok(web::Json(examples.into_iter().map(Into::into).collect()))
}

/// Predict a rating from price, category and stock.
#[utoipa::path(
    post,
    path = "/api/v1/ml/predictions",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Prediction", body = PredictionResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Missing or invalid access token", body = DomainError)
    ),
    tags = ["ml"],
    operation_id = "mlPredict",
    security(("BearerAuth" = []))
)]
#[post("/ml/predictions")]
pub async fn predict(
    access: BearerAccess,
    state: web::Data<HttpState>,
    payload: web::Json<PredictionRequest>,
) -> ApiResult<web::Json<PredictionResponse>> {
    debug!(subject = access.subject(), "prediction requested");
    let input = PredictionInput::from(payload.into_inner());
    Ok(web::Json(state.insights.predict(&input).await?.into()))
}
