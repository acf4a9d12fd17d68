//! Aggregate statistics over catalogue records.

use std::collections::BTreeMap;

use super::{Book, Rating};

/// Mean, minimum and maximum price of a non-empty set of records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Lowest price.
    pub min: f64,
    /// Highest price.
    pub max: f64,
}

impl PriceSummary {
    /// Summarise the prices of `books`, or `None` when there are none.
    #[must_use]
    pub fn of<'a>(books: impl IntoIterator<Item = &'a Book>) -> Option<Self> {
        let mut count = 0_u32;
        let mut total = 0.0_f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for book in books {
            count += 1;
            total += book.price;
            min = min.min(book.price);
            max = max.max(book.price);
        }
        (count > 0).then(|| Self {
            mean: total / f64::from(count),
            min,
            max,
        })
    }
}

/// Count of records per star rating. Every rating from one to five is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingHistogram(BTreeMap<u8, u64>);

impl RatingHistogram {
    /// Tally the ratings of `books`.
    #[must_use]
    pub fn of<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        let mut counts: BTreeMap<u8, u64> = (Rating::MIN..=Rating::MAX).map(|r| (r, 0)).collect();
        for book in books {
            *counts.entry(book.rating.get()).or_default() += 1;
        }
        Self(counts)
    }

    /// Records with `stars`.
    #[must_use]
    pub fn count(&self, stars: u8) -> u64 {
        self.0.get(&stars).copied().unwrap_or_default()
    }

    /// `(stars, count)` pairs in ascending star order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().map(|(stars, count)| (*stars, *count))
    }
}

/// Mean star rating of `books`, or `None` when there are none.
#[must_use]
pub fn mean_rating<'a>(books: impl IntoIterator<Item = &'a Book>) -> Option<f64> {
    let (count, total) = books.into_iter().fold((0_u32, 0_u32), |(n, sum), book| {
        (n + 1, sum + u32::from(book.rating.get()))
    });
    (count > 0).then(|| f64::from(total) / f64::from(count))
}

/// Collection-wide statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueOverview {
    /// Number of loaded records.
    pub total_books: usize,
    /// Absent when the store is empty.
    pub price: Option<PriceSummary>,
    /// Count per star rating.
    pub rating_distribution: RatingHistogram,
}

impl CatalogueOverview {
    /// Compute the overview for a snapshot.
    #[must_use]
    pub fn of(books: &[Book]) -> Self {
        Self {
            total_books: books.len(),
            price: PriceSummary::of(books),
            rating_distribution: RatingHistogram::of(books),
        }
    }
}

/// Statistics for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    /// Category name.
    pub category: String,
    /// Records in the category.
    pub total_books: usize,
    /// Price figures for the category.
    pub price: PriceSummary,
    /// Mean star rating.
    pub mean_rating: f64,
    /// Count per star rating.
    pub rating_distribution: RatingHistogram,
}

/// Per-category statistics sorted by category name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// One entry per category, sorted by name.
    pub categories: Vec<CategoryStats>,
}

impl CategoryBreakdown {
    /// Group `books` by category and summarise each group.
    #[must_use]
    pub fn of(books: &[Book]) -> Self {
        let mut groups: BTreeMap<&str, Vec<&Book>> = BTreeMap::new();
        for book in books {
            groups.entry(book.category.as_str()).or_default().push(book);
        }
        let categories = groups
            .into_iter()
            .filter_map(|(category, members)| {
                let price = PriceSummary::of(members.iter().copied())?;
                let mean_rating = mean_rating(members.iter().copied())?;
                Some(CategoryStats {
                    category: category.to_owned(),
                    total_books: members.len(),
                    price,
                    mean_rating,
                    rating_distribution: RatingHistogram::of(members.iter().copied()),
                })
            })
            .collect();
        Self { categories }
    }

    /// Number of distinct categories.
    #[must_use]
    pub fn total_categories(&self) -> usize {
        self.categories.len()
    }
}

/// Overall state of the loaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataHealthStatus {
    /// File present with at least one record.
    Healthy,
    /// File present but no records parsed.
    Warning,
    /// File missing.
    Error,
}

impl DataHealthStatus {
    /// Wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Data availability report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataHealth {
    /// Overall verdict.
    pub status: DataHealthStatus,
    /// Human-readable explanation of the verdict.
    pub message: String,
    /// Number of loaded records.
    pub total_books: usize,
    /// Whether the source file existed at load time.
    pub source_found: bool,
}

impl DataHealth {
    /// Classify a snapshot.
    #[must_use]
    pub fn assess(total_books: usize, source_found: bool) -> Self {
        let (status, message) = match (source_found, total_books) {
            (true, 0) => (
                DataHealthStatus::Warning,
                "data file loaded but contains no books".to_owned(),
            ),
            (true, n) => (
                DataHealthStatus::Healthy,
                format!("serving {n} books"),
            ),
            (false, _) => (
                DataHealthStatus::Error,
                "data file not found".to_owned(),
            ),
        };
        Self {
            status,
            message,
            total_books,
            source_found,
        }
    }
}
