//! Catalogue query, statistics and insight use-cases.
//!
//! Every call reads the current snapshot from the [`BookRepository`] and
//! derives its answer from it; nothing is cached here.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::insights::{encode_features, predict_rating, training_examples};
use crate::domain::ports::{
    BookInsightsQuery, BookRepository, BookRepositoryError, BookSearch, CatalogueQuery,
    CatalogueSnapshot, CatalogueStatsQuery, PriceRangeMatch,
};
use crate::domain::{
    Book, BookFeatures, BookId, CatalogueOverview, CategoryBreakdown, DataHealth, DomainError,
    PredictionInput, RatingPrediction, TrainingExample,
};

/// Service implementing the catalogue driving ports over a repository.
#[derive(Clone)]
pub struct CatalogueService<R> {
    repository: Arc<R>,
}

impl<R> CatalogueService<R> {
    /// Create a service reading from `repository`.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: BookRepositoryError) -> DomainError {
    DomainError::internal(error.to_string())
}

fn invalid_field(field: &str, message: &str) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": "invalid_value",
    }))
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|raw| raw.trim())
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_lowercase)
}

fn sorted_categories(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .map(|book| book.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Highest rated books.
///
/// Without a limit every book sharing the maximum rating is returned. With a
/// limit the books are ordered by rating (stable, so source order breaks ties),
/// cut at `limit`, and then extended with any further books tying the rating
/// at the cut.
fn top_rated_of(books: &[Book], limit: Option<usize>) -> Vec<Book> {
    let mut ranked: Vec<&Book> = books.iter().collect();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating));

    let cutoff = match limit {
        None => ranked.first().map(|book| book.rating),
        Some(n) => ranked.get(n.saturating_sub(1)).map(|book| book.rating),
    };
    let keep = match (limit, cutoff) {
        (_, None) => ranked.len(),
        (Some(n), Some(rating)) => {
            n + ranked
                .iter()
                .skip(n)
                .take_while(|book| book.rating == rating)
                .count()
        }
        (None, Some(rating)) => ranked.iter().take_while(|book| book.rating == rating).count(),
    };
    ranked.into_iter().take(keep).cloned().collect()
}

impl<R> CatalogueService<R>
where
    R: BookRepository,
{
    async fn snapshot(&self) -> Result<CatalogueSnapshot, DomainError> {
        self.repository
            .snapshot()
            .await
            .map_err(map_repository_error)
    }

    async fn books(&self) -> Result<Arc<[Book]>, DomainError> {
        Ok(self.snapshot().await?.books)
    }
}

#[async_trait]
impl<R> CatalogueQuery for CatalogueService<R>
where
    R: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, DomainError> {
        Ok(self.books().await?.to_vec())
    }

    async fn get_book(&self, id: BookId) -> Result<Book, DomainError> {
        self.books()
            .await?
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("book {id} not found")))
    }

    async fn search(&self, criteria: &BookSearch) -> Result<Vec<Book>, DomainError> {
        let title = non_blank(criteria.title.as_ref());
        let category = non_blank(criteria.category.as_ref());
        if title.is_none() && category.is_none() {
            return Err(DomainError::invalid_request(
                "provide at least one of title or category",
            )
            .with_details(json!({ "fields": ["title", "category"], "code": "missing_filter" })));
        }

        let books = self.books().await?;
        Ok(books
            .iter()
            .filter(|book| {
                title
                    .as_deref()
                    .is_none_or(|t| book.title.to_lowercase().contains(t))
                    && category
                        .as_deref()
                        .is_none_or(|c| book.category.to_lowercase().contains(c))
            })
            .cloned()
            .collect())
    }

    async fn top_rated(&self, limit: Option<usize>) -> Result<Vec<Book>, DomainError> {
        if limit == Some(0) {
            return Err(invalid_field("limit", "limit must be at least 1"));
        }
        Ok(top_rated_of(&self.books().await?, limit))
    }

    async fn price_range(
        &self,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<PriceRangeMatch, DomainError> {
        let min = min.ok_or_else(|| invalid_field("min", "min price is required"))?;
        let max = max.ok_or_else(|| invalid_field("max", "max price is required"))?;
        for (field, value) in [("min", min), ("max", max)] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_field(field, "prices must be non-negative numbers"));
            }
        }
        if min > max {
            return Err(invalid_field("min", "min price must not exceed max price"));
        }

        let books = self.books().await?;
        Ok(PriceRangeMatch {
            books: books
                .iter()
                .filter(|book| (min..=max).contains(&book.price))
                .cloned()
                .collect(),
            min,
            max,
        })
    }

    async fn categories(&self) -> Result<Vec<String>, DomainError> {
        Ok(sorted_categories(&self.books().await?))
    }

    async fn health(&self) -> Result<DataHealth, DomainError> {
        let snapshot = self.snapshot().await?;
        Ok(DataHealth::assess(snapshot.books.len(), snapshot.source_found))
    }
}

#[async_trait]
impl<R> CatalogueStatsQuery for CatalogueService<R>
where
    R: BookRepository,
{
    async fn overview(&self) -> Result<CatalogueOverview, DomainError> {
        Ok(CatalogueOverview::of(&self.books().await?))
    }

    async fn category_stats(&self) -> Result<CategoryBreakdown, DomainError> {
        Ok(CategoryBreakdown::of(&self.books().await?))
    }
}

#[async_trait]
impl<R> BookInsightsQuery for CatalogueService<R>
where
    R: BookRepository,
{
    async fn features(&self) -> Result<Vec<BookFeatures>, DomainError> {
        let books = self.books().await?;
        Ok(encode_features(&books, &sorted_categories(&books)))
    }

    async fn training_data(&self) -> Result<Vec<TrainingExample>, DomainError> {
        Ok(training_examples(self.features().await?))
    }

    async fn predict(&self, input: &PredictionInput) -> Result<RatingPrediction, DomainError> {
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(invalid_field("price", "price must be a non-negative number"));
        }
        if input.category.trim().is_empty() {
            return Err(invalid_field("category", "category must not be empty"));
        }
        Ok(predict_rating(&self.books().await?, input))
    }
}

#[cfg(test)]
mod tests;
