//! Driving port for feature export and rating prediction.

use async_trait::async_trait;

use crate::domain::{
    BookFeatures, DomainError, PredictionInput, RatingPrediction, TrainingExample,
};

/// Model-facing use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInsightsQuery: Send + Sync {
    /// Encoded features for every record.
    async fn features(&self) -> Result<Vec<BookFeatures>, DomainError>;

    /// Features paired with their rating target.
    async fn training_data(&self) -> Result<Vec<TrainingExample>, DomainError>;

    /// Heuristic rating prediction.
    async fn predict(&self, input: &PredictionInput) -> Result<RatingPrediction, DomainError>;
}
