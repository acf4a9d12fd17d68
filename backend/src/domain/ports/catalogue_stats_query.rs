//! Driving port for aggregate catalogue statistics.

use async_trait::async_trait;

use crate::domain::{CatalogueOverview, CategoryBreakdown, DomainError};

/// Statistics use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueStatsQuery: Send + Sync {
    /// Collection-wide statistics.
    async fn overview(&self) -> Result<CatalogueOverview, DomainError>;

    /// Statistics grouped by category.
    async fn category_stats(&self) -> Result<CategoryBreakdown, DomainError>;
}
