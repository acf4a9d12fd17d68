//! Driving port for catalogue lookups and searches.

use async_trait::async_trait;

use crate::domain::{Book, BookId, DataHealth, DomainError};

/// Optional title/category filters. At least one must be non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearch {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Case-insensitive category name.
    pub category: Option<String>,
}

/// Books inside an inclusive price range, with the range echoed back.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRangeMatch {
    /// Matching records in file order.
    pub books: Vec<Book>,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

/// Catalogue read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Every loaded record in source order.
    async fn list_books(&self) -> Result<Vec<Book>, DomainError>;

    /// Record with `id`, or `NotFound`.
    async fn get_book(&self, id: BookId) -> Result<Book, DomainError>;

    /// Case-insensitive substring search over title and category.
    async fn search(&self, criteria: &BookSearch) -> Result<Vec<Book>, DomainError>;

    /// Highest rated records. See the service docs for how `limit` and ties
    /// interact.
    async fn top_rated(&self, limit: Option<usize>) -> Result<Vec<Book>, DomainError>;

    /// Records priced within `[min, max]`. Both bounds are required.
    async fn price_range(
        &self,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<PriceRangeMatch, DomainError>;

    /// Sorted distinct category labels.
    async fn categories(&self) -> Result<Vec<String>, DomainError>;

    /// Data availability report.
    async fn health(&self) -> Result<DataHealth, DomainError>;
}
